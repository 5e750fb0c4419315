//! Unit tests for team roster, roles, and leaderboard derivation.

use std::sync::Arc;
use uuid::Uuid;

use fitquest::storage::Database;
use fitquest::team::{rank, TeamError, TeamManager, TeamRole};

fn manager() -> TeamManager {
    let db = Arc::new(Database::open_in_memory().unwrap());
    TeamManager::new(db)
}

#[test]
fn test_add_and_get_member() {
    let team = manager();

    let member = team.add_member("Ava").unwrap();
    let loaded = team.get_member(member.id).unwrap();

    assert_eq!(loaded.name, "Ava");
    assert_eq!(loaded.points, 0);
    assert!(loaded.role.is_none());
}

#[test]
fn test_get_unknown_member() {
    let team = manager();
    let err = team.get_member(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, TeamError::MemberNotFound(_)));
}

#[test]
fn test_assign_role_unknown_role_id() {
    let team = manager();
    let member = team.add_member("Ava").unwrap();

    let err = team.assign_role(member.id, "cheerleader").unwrap_err();
    assert!(matches!(err, TeamError::InvalidRole(role) if role == "cheerleader"));

    // Member untouched
    assert!(team.get_member(member.id).unwrap().role.is_none());
}

#[test]
fn test_assign_role_unknown_member() {
    let team = manager();
    team.add_member("Ava").unwrap();

    let err = team.assign_role(Uuid::new_v4(), "motivator").unwrap_err();
    assert!(matches!(err, TeamError::MemberNotFound(_)));
}

#[test]
fn test_assign_role_sets_holder() {
    let team = manager();
    let member = team.add_member("Ava").unwrap();

    let updated = team.assign_role(member.id, "motivator").unwrap();
    assert_eq!(updated.role, Some(TeamRole::Motivator));
}

#[test]
fn test_role_reassignment_keeps_single_holder() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();
    let b = team.add_member("Ben").unwrap();

    team.assign_role(a.id, "motivator").unwrap();
    team.assign_role(b.id, "motivator").unwrap();

    let members = team.members().unwrap();
    let holders: Vec<_> = members
        .iter()
        .filter(|m| m.role == Some(TeamRole::Motivator))
        .collect();

    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].id, b.id);
    assert!(team.get_member(a.id).unwrap().role.is_none());
}

#[test]
fn test_member_can_switch_roles() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();

    team.assign_role(a.id, "motivator").unwrap();
    let updated = team.assign_role(a.id, "recipe-sharer").unwrap();

    assert_eq!(updated.role, Some(TeamRole::RecipeSharer));
    assert!(team.available_roles().unwrap().contains(&TeamRole::Motivator));
}

#[test]
fn test_available_roles_shrink_as_assigned() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();

    assert_eq!(team.available_roles().unwrap().len(), 3);

    team.assign_role(a.id, "check-in-leader").unwrap();
    let available = team.available_roles().unwrap();

    assert_eq!(available.len(), 2);
    assert!(!available.contains(&TeamRole::CheckInLeader));
}

#[test]
fn test_form_team_reports_missing_roles() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();

    team.assign_role(a.id, "motivator").unwrap();

    let err = team.form_team().unwrap_err();
    match err {
        TeamError::IncompleteTeam(missing) => {
            assert_eq!(
                missing,
                vec![TeamRole::RecipeSharer, TeamRole::CheckInLeader]
            );
        }
        other => panic!("expected IncompleteTeam, got {other:?}"),
    }
}

#[test]
fn test_form_team_succeeds_when_all_roles_held() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();
    let b = team.add_member("Ben").unwrap();
    let c = team.add_member("Cleo").unwrap();

    team.assign_role(a.id, "motivator").unwrap();
    team.assign_role(b.id, "recipe-sharer").unwrap();
    team.assign_role(c.id, "check-in-leader").unwrap();

    let composition = team.form_team().unwrap();
    assert_eq!(composition.motivator.id, a.id);
    assert_eq!(composition.recipe_sharer.id, b.id);
    assert_eq!(composition.check_in_leader.id, c.id);
    assert_eq!(composition.holder(TeamRole::Motivator).id, a.id);
}

#[test]
fn test_set_points_and_achievements() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();

    team.set_points(a.id, 1200).unwrap();
    team.record_achievement(a.id, "first-steps").unwrap();
    // Duplicate is a no-op
    team.record_achievement(a.id, "first-steps").unwrap();

    let loaded = team.get_member(a.id).unwrap();
    assert_eq!(loaded.points, 1200);
    assert_eq!(loaded.achievements, vec!["first-steps".to_string()]);
}

#[test]
fn test_leaderboard_from_roster_order_is_stable() {
    let team = manager();
    let a = team.add_member("Ava").unwrap();
    let b = team.add_member("Ben").unwrap();
    let c = team.add_member("Cleo").unwrap();

    team.set_points(a.id, 100).unwrap();
    team.set_points(b.id, 300).unwrap();
    team.set_points(c.id, 100).unwrap();

    let ranked = rank(&team.members().unwrap());

    assert_eq!(ranked[0].name, "Ben");
    // Ava and Cleo tie on points; roster order breaks the tie
    assert_eq!(ranked[1].name, "Ava");
    assert_eq!(ranked[2].name, "Cleo");
    assert_eq!(ranked[2].rank, 3);
}
