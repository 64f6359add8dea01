//! Single-event handling against in-memory services.

mod support;

use std::sync::Arc;

use roster_core::types::{TeamSlug, UserId, Username};
use roster_core::ChatEvent;
use roster_engine::FailureCause;

use support::{config, engine, profile, today, FakeChat, FakeSheet, FakeTeams};

fn joined(channel: &str, user: &str, profile: roster_core::profile::UserProfile) -> ChatEvent {
    ChatEvent::MemberJoined {
        channel: channel.into(),
        user: user.into(),
        profile,
    }
}

fn left(channel: &str, user: &str, profile: roster_core::profile::UserProfile) -> ChatEvent {
    ChatEvent::MemberLeft {
        channel: channel.into(),
        user: user.into(),
        profile,
    }
}

#[tokio::test]
async fn join_adds_to_team_and_appends_ledger_row() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams {
        org: ["carol".into()].into(),
        ..FakeTeams::default()
    });
    let sheet = Arc::new(FakeSheet::empty());
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    engine
        .handle_event(&joined(
            "C1",
            "U_C",
            profile("Carol", Some("https://github.com/Carol")),
        ))
        .await
        .expect("handled");

    assert!(teams
        .team(&TeamSlug::from("platform"))
        .contains(&Username::new("carol")));
    let rows = sheet.snapshot();
    assert_eq!(rows, [["Carol", "", today().as_str(), "", "", "carol"]]);
}

#[tokio::test]
async fn same_day_join_is_recorded_once() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams {
        org: ["carol".into()].into(),
        ..FakeTeams::default()
    });
    let today = today();
    let sheet = Arc::new(FakeSheet::with_rows(&[&[
        "Carol",
        "Engineer",
        today.as_str(),
        "",
        "",
        "carol",
    ]]));
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    engine
        .handle_event(&joined(
            "C1",
            "U_C",
            profile("Carol", Some("https://github.com/carol")),
        ))
        .await
        .expect("handled");

    // Redelivered event, same day: the ledger must not grow.
    assert_eq!(sheet.snapshot().len(), 1);
}

#[tokio::test]
async fn rejoin_copies_name_and_position_from_last_row() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams {
        org: ["carol".into()].into(),
        ..FakeTeams::default()
    });
    let sheet = Arc::new(FakeSheet::with_rows(&[&[
        "Carol M.",
        "Staff Engineer",
        "01/05/2026",
        "02/01/2026",
        "",
        "carol",
    ]]));
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    engine
        .handle_event(&joined(
            "C1",
            "U_C",
            profile("Carol", Some("https://github.com/carol")),
        ))
        .await
        .expect("handled");

    let rows = sheet.snapshot();
    assert_eq!(rows.len(), 2);
    // Name and position come from the previous period, not the profile.
    assert_eq!(
        rows[1],
        ["Carol M.", "Staff Engineer", today().as_str(), "", "", "carol"]
    );
}

#[tokio::test]
async fn join_without_profile_appends_anonymous_row_and_sends_reminder() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams::default());
    let sheet = Arc::new(FakeSheet::empty());
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    let err = engine
        .handle_event(&joined("C1", "U_N", profile("Newcomer", None)))
        .await
        .expect_err("missing profile surfaces");
    assert!(err.missing_profile());

    // Name and date only; the username is backfilled later.
    assert_eq!(
        sheet.snapshot(),
        [["Newcomer", "", today().as_str(), "", "", ""]]
    );
    assert!(teams.team(&TeamSlug::from("platform")).is_empty());

    let sent = chat.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, UserId::from("U_N"));
    assert_eq!(
        sent[0].1,
        "Hi! Please, remember to set your Github url in your profile."
    );
}

#[tokio::test]
async fn join_from_unmapped_channel_reports_missing_team() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams {
        org: ["carol".into()].into(),
        ..FakeTeams::default()
    });
    let engine = engine(config(&[("C1", "platform")], &[]), &chat, Some(&teams), None);

    let err = engine
        .handle_event(&joined(
            "C9",
            "U_C",
            profile("Carol", Some("https://github.com/carol")),
        ))
        .await
        .expect_err("unmapped channel");
    assert_eq!(err.causes.len(), 1);
    assert!(matches!(
        err.causes[0],
        FailureCause::TeamReferenceMissing { .. }
    ));
    assert!(chat.sent_messages().is_empty());
}

#[tokio::test]
async fn join_of_non_org_member_fails_but_still_keeps_ledger() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams::default());
    let sheet = Arc::new(FakeSheet::empty());
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    let err = engine
        .handle_event(&joined(
            "C1",
            "U_O",
            profile("Outsider", Some("https://github.com/outsider")),
        ))
        .await
        .expect_err("not an org member");
    assert_eq!(err.causes.len(), 1);
    assert!(matches!(err.causes[0], FailureCause::NotOrgMember { .. }));

    // The team was untouched but the channel join is still on record.
    assert!(teams.team(&TeamSlug::from("platform")).is_empty());
    assert_eq!(sheet.snapshot().len(), 1);
}

#[tokio::test]
async fn leave_removes_from_team_and_closes_ledger_row() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams {
        org: ["carol".into()].into(),
        teams: std::sync::Mutex::new(
            [(TeamSlug::from("platform"), ["carol".into()].into())].into(),
        ),
        ..FakeTeams::default()
    });
    let sheet = Arc::new(FakeSheet::with_rows(&[&[
        "Carol",
        "Engineer",
        "01/05/2026",
        "",
        "",
        "carol",
    ]]));
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    engine
        .handle_event(&left(
            "C1",
            "U_C",
            profile("Carol", Some("https://github.com/carol")),
        ))
        .await
        .expect("handled");

    assert!(teams.team(&TeamSlug::from("platform")).is_empty());
    let rows = sheet.snapshot();
    assert_eq!(
        rows,
        [["Carol", "Engineer", "01/05/2026", today().as_str(), "", "carol"]]
    );
}

#[tokio::test]
async fn leave_of_closed_row_changes_nothing() {
    let chat = Arc::new(FakeChat::default());
    let teams = Arc::new(FakeTeams::default());
    let sheet = Arc::new(FakeSheet::with_rows(&[&[
        "Carol",
        "Engineer",
        "01/05/2026",
        "02/01/2026",
        "",
        "carol",
    ]]));
    let before = sheet.snapshot();
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    let err = engine
        .handle_event(&left(
            "C1",
            "U_C",
            profile("Carol", Some("https://github.com/carol")),
        ))
        .await
        .expect_err("row already closed");
    assert_eq!(err.causes.len(), 1);
    assert!(matches!(
        &err.causes[0],
        FailureCause::Sheet(roster_sheets::SheetError::AlreadyClosed { .. })
    ));
    // The guard leaves the sheet byte-for-byte untouched.
    assert_eq!(sheet.snapshot(), before);
}

#[tokio::test]
async fn profile_change_backfills_username_and_readds_to_team() {
    let chat = Arc::new(FakeChat {
        members: [("C1".into(), vec![UserId::from("U_N")])].into(),
        ..FakeChat::default()
    });
    let teams = Arc::new(FakeTeams {
        org: ["newbie".into()].into(),
        ..FakeTeams::default()
    });
    let sheet = Arc::new(FakeSheet::with_rows(&[&["Newcomer", "", "01/05/2026"]]));
    let engine = engine(
        config(&[("C1", "platform")], &["C1"]),
        &chat,
        Some(&teams),
        Some(&sheet),
    );

    engine
        .handle_event(&ChatEvent::ProfileChanged {
            user: "U_N".into(),
            profile: profile("Newcomer", Some("https://github.com/Newbie")),
        })
        .await
        .expect("handled");

    assert!(teams
        .team(&TeamSlug::from("platform"))
        .contains(&Username::new("newbie")));
    // The anonymous row gained its username; everything else is preserved.
    assert_eq!(
        sheet.snapshot(),
        [["Newcomer", "", "01/05/2026", "", "", "newbie"]]
    );
}

#[tokio::test]
async fn profile_change_for_user_outside_channels_is_a_noop() {
    let chat = Arc::new(FakeChat {
        members: [("C1".into(), vec![UserId::from("U_OTHER")])].into(),
        ..FakeChat::default()
    });
    let teams = Arc::new(FakeTeams::default());
    let engine = engine(config(&[("C1", "platform")], &[]), &chat, Some(&teams), None);

    engine
        .handle_event(&ChatEvent::ProfileChanged {
            user: "U_N".into(),
            profile: profile("Newcomer", Some("https://github.com/newbie")),
        })
        .await
        .expect("handled");

    assert!(teams.team(&TeamSlug::from("platform")).is_empty());
}

#[tokio::test]
async fn profile_change_without_url_reports_missing_profile() {
    let chat = Arc::new(FakeChat::default());
    let engine = engine(config(&[("C1", "platform")], &[]), &chat, None, None);

    let err = engine
        .handle_event(&ChatEvent::ProfileChanged {
            user: "U_N".into(),
            profile: profile("Newcomer", None),
        })
        .await
        .expect_err("no URL to resolve");
    assert!(err.missing_profile());
}
