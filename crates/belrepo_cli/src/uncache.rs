//! `belrepo uncache`, `uncache-global` and `uncache-local`.

use belrepo_repository::Repository;

use crate::pipeline::open_repository;
use crate::{ConfirmArgs, GlobalArgs};

/// Which caches a command deletes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Aggregate and per-document caches.
    All,
    /// The aggregate cache.
    Aggregate,
    /// The per-document caches.
    Documents,
}

/// Runs one of the `belrepo uncache*` commands.
///
/// Without `--yes` nothing is deleted and the exit code is 1.
pub fn run(args: &ConfirmArgs, scope: Scope, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !args.yes {
        eprintln!("error: refusing to delete caches without --yes");
        return Ok(1);
    }

    let repo = open_repository(global)?;
    let removed = clear(&repo, scope)?;
    if !global.quiet {
        eprintln!("   Removed {removed} cache file(s)");
    }
    Ok(0)
}

fn clear(repo: &Repository, scope: Scope) -> Result<usize, belrepo_repository::RepositoryError> {
    match scope {
        Scope::All => repo.clear_all(),
        Scope::Aggregate => repo.clear_aggregate(),
        Scope::Documents => repo.clear_documents(),
    }
}
