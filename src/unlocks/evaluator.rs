//! Unlock requirement evaluation.

use super::types::{Requirements, UserProgress};

/// Whether the given progress satisfies a requirement set.
///
/// A positive points threshold must be reached and every required
/// achievement must be earned. An empty requirement set is always met.
pub fn meets(requirements: &Requirements, progress: &UserProgress) -> bool {
    if requirements.points > 0 && progress.points < requirements.points {
        return false;
    }

    requirements
        .achievements
        .iter()
        .all(|required| progress.has_achievement(required))
}
