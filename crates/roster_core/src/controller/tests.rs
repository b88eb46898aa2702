use super::*;
use crate::error::ErrorKind;
use crate::models::PlayerField;
use std::fs;
use tempfile::TempDir;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn controller() -> PlayerController {
    let repo = PlayerRepository::open_in_memory().unwrap();
    PlayerController::new(repo, RosterConfig::default()).with_today(fixed_today)
}

fn raw(name: &str, date: &str, team: &str, squad: &str) -> RawPlayer {
    RawPlayer {
        full_name: name.to_string(),
        birth_date: date.to_string(),
        team: team.to_string(),
        home_city: "Buenos Aires".to_string(),
        squad: squad.to_string(),
        position: "Defender".to_string(),
    }
}

fn messi() -> RawPlayer {
    RawPlayer {
        full_name: "Lionel Messi".to_string(),
        birth_date: "1987-06-24".to_string(),
        team: "Inter Miami".to_string(),
        home_city: "Miami".to_string(),
        squad: "Main".to_string(),
        position: "Forward".to_string(),
    }
}

fn team_filter(team: &str) -> RawFilter {
    RawFilter { team: Some(team.to_string()), ..RawFilter::default() }
}

#[test]
fn test_messi_scenario() {
    let mut ctl = controller();

    let stored = ctl.add_player(&messi()).unwrap();
    assert_eq!(stored.id, PlayerId(1));

    let page = ctl.search_players(&team_filter("Inter Miami"), 1, 10).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items, vec![stored.clone()]);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roster.xml");
    assert_eq!(ctl.export_all(&path).unwrap(), 1);

    let xml = fs::read_to_string(&path).unwrap();
    assert_eq!(xml.matches("<player>").count(), 1);
    assert!(xml.contains("<team>Inter Miami</team>"));

    let imported = ctl.import_all(&path).unwrap();
    assert_eq!(imported, vec![PlayerId(2)]);

    let reimported = ctl.repository().get(PlayerId(2)).unwrap().unwrap();
    assert_eq!(reimported.player, stored.player);
}

#[test]
fn test_add_player_validation_message() {
    let mut ctl = controller();
    let mut input = messi();
    input.home_city = "  ".to_string();

    let err = ctl.add_player(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains(PlayerField::HomeCity.label()), "{}", err.message);
    assert_eq!(ctl.list_players().unwrap().len(), 0);
}

#[test]
fn test_add_player_future_birth_date() {
    let mut ctl = controller();
    let mut input = messi();
    input.birth_date = "2024-06-02".to_string();

    let err = ctl.add_player(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[test]
fn test_add_player_honours_configured_min_year() {
    let repo = PlayerRepository::open_in_memory().unwrap();
    let config = RosterConfig { min_birth_year: 1990, ..RosterConfig::default() };
    let mut ctl = PlayerController::new(repo, config).with_today(fixed_today);

    let err = ctl.add_player(&messi()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[test]
fn test_update_player() {
    let mut ctl = controller();
    let stored = ctl.add_player(&messi()).unwrap();

    let mut moved = messi();
    moved.team = "  Newell's Old Boys ".to_string();
    moved.home_city = "Rosario".to_string();

    let updated = ctl.update_player(stored.id, &moved).unwrap();
    assert_eq!(updated.player.team(), "Newell's Old Boys");

    let all = ctl.list_players().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].player.home_city(), "Rosario");
}

#[test]
fn test_update_missing_player() {
    let mut ctl = controller();
    ctl.add_player(&messi()).unwrap();
    let before = ctl.list_players().unwrap();

    let err = ctl.update_player(PlayerId(99), &messi()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(ctl.list_players().unwrap(), before);
}

#[test]
fn test_update_validates_before_lookup() {
    let mut ctl = controller();
    let mut input = messi();
    input.full_name = String::new();

    let err = ctl.update_player(PlayerId(99), &input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[test]
fn test_remove_player_twice() {
    let mut ctl = controller();
    let stored = ctl.add_player(&messi()).unwrap();

    ctl.remove_player(stored.id).unwrap();
    let err = ctl.remove_player(stored.id).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[test]
fn test_remove_players_by_criteria() {
    let mut ctl = controller();
    ctl.add_player(&raw("Juan Pérez", "2007-04-01", "Boca Juniors", "Youth")).unwrap();
    ctl.add_player(&raw("Carlos Gómez", "2006-08-12", "Boca Juniors", "Youth")).unwrap();
    ctl.add_player(&raw("Diego Ruiz", "1998-11-30", "Boca Juniors", "Main")).unwrap();
    ctl.add_player(&messi()).unwrap();

    let criteria = RawFilter {
        team: Some("Boca Juniors".to_string()),
        squad: Some("Youth".to_string()),
        ..RawFilter::default()
    };
    assert_eq!(ctl.remove_players(&criteria).unwrap(), 2);
    assert_eq!(ctl.list_players().unwrap().len(), 2);

    assert_eq!(ctl.remove_players(&criteria).unwrap(), 0);
}

#[test]
fn test_remove_players_requires_criteria() {
    let mut ctl = controller();
    ctl.add_player(&messi()).unwrap();

    let blank = RawFilter { full_name: Some("   ".to_string()), ..RawFilter::default() };
    let err = ctl.remove_players(&blank).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
    assert_eq!(ctl.list_players().unwrap().len(), 1);
}

#[test]
fn test_search_rejects_unlisted_page_size() {
    let ctl = controller();
    let err = ctl.search_players(&RawFilter::default(), 1, 20).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);

    let err = ctl.search_players(&RawFilter::default(), 0, 10).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_search_rejects_bad_filter_date() {
    let ctl = controller();
    let criteria = RawFilter { birth_date: Some("June 1987".to_string()), ..RawFilter::default() };
    let err = ctl.search_players(&criteria, 1, 10).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_search_pagination() {
    let mut ctl = controller();
    for i in 0..27 {
        ctl.add_player(&raw(&format!("Player {i:02}"), "2000-01-01", "River Plate", "Main"))
            .unwrap();
    }

    let third = ctl.search_players(&team_filter("River Plate"), 3, 10).unwrap();
    assert_eq!(third.total, 27);
    assert_eq!(third.items.len(), 7);
    assert_eq!(third.items[0].player.full_name(), "Player 20");
    assert_eq!(third.total_pages(), 3);
    assert!(!third.has_next());

    let beyond = ctl.search_players(&team_filter("River Plate"), 4, 10).unwrap();
    assert!(beyond.is_empty());
    assert_eq!(beyond.total, 27);
}

#[test]
fn test_export_selected_in_given_order() {
    let mut ctl = controller();
    let a = ctl.add_player(&raw("Alpha", "2000-01-01", "Team A", "Main")).unwrap();
    let b = ctl.add_player(&raw("Bravo", "2000-01-01", "Team B", "Main")).unwrap();
    ctl.add_player(&raw("Charlie", "2000-01-01", "Team C", "Main")).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("selected.xml");
    assert_eq!(ctl.export_selected(&path, &[b.id, a.id]).unwrap(), 2);

    let xml = fs::read_to_string(&path).unwrap();
    let bravo = xml.find("Bravo").unwrap();
    let alpha = xml.find("Alpha").unwrap();
    assert!(bravo < alpha);
    assert!(!xml.contains("Charlie"));
}

#[test]
fn test_export_selected_unknown_id_writes_nothing() {
    let mut ctl = controller();
    let a = ctl.add_player(&messi()).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("selected.xml");
    let err = ctl.export_selected(&path, &[a.id, PlayerId(404)]).unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(!path.exists());
}

#[test]
fn test_export_to_directory_is_storage_error() {
    let ctl = controller();
    let temp_dir = TempDir::new().unwrap();

    let err = ctl.export_all(temp_dir.path()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut ctl = controller();
    ctl.add_player(&messi()).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.xml");
    fs::write(
        &path,
        r#"<players>
            <player>
                <full_name>Good Player</full_name>
                <birth_date>2000-01-01</birth_date>
                <team>Team A</team>
                <home_city>City</home_city>
                <squad>Squad 1</squad>
                <position>Forward</position>
            </player>
            <player>
                <birth_date>2000-01-01</birth_date>
                <team>Team A</team>
                <home_city>City</home_city>
                <squad>Squad 1</squad>
                <position>Forward</position>
            </player>
        </players>"#,
    )
    .unwrap();

    let err = ctl.import_all(&path).unwrap_err();
    assert_eq!(err.kind, ErrorKind::XmlFormat);
    assert!(err.message.contains("Player #2"), "{}", err.message);
    assert_eq!(ctl.list_players().unwrap().len(), 1);

    let err = ctl.load_database(&path).unwrap_err();
    assert_eq!(err.kind, ErrorKind::XmlFormat);
    assert_eq!(ctl.list_players().unwrap().len(), 1);
}

#[test]
fn test_import_missing_file() {
    let mut ctl = controller();
    let temp_dir = TempDir::new().unwrap();

    let err = ctl.import_all(&temp_dir.path().join("nonexistent.xml")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);
}

#[test]
fn test_load_database_replaces_roster() {
    let mut ctl = controller();
    ctl.add_player(&raw("Old One", "1990-01-01", "Old FC", "Main")).unwrap();
    ctl.add_player(&raw("Old Two", "1990-01-01", "Old FC", "Main")).unwrap();

    let mut source = controller();
    source.add_player(&messi()).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roster.xml");
    source.export_all(&path).unwrap();

    let ids = ctl.load_database(&path).unwrap();
    assert_eq!(ids.len(), 1);

    let all = ctl.list_players().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].player.full_name(), "Lionel Messi");
}

#[test]
fn test_open_uses_configured_path() {
    let temp_dir = TempDir::new().unwrap();
    let config = RosterConfig {
        database_path: temp_dir.path().join("squad.db"),
        ..RosterConfig::default()
    };

    {
        let mut ctl = PlayerController::open(config.clone()).unwrap().with_today(fixed_today);
        ctl.add_player(&messi()).unwrap();
    }

    let ctl = PlayerController::open(config).unwrap();
    assert_eq!(ctl.list_players().unwrap().len(), 1);
}

#[test]
fn test_open_unavailable_database() {
    let temp_dir = TempDir::new().unwrap();
    let config = RosterConfig {
        database_path: temp_dir.path().join("no").join("such").join("dir.db"),
        ..RosterConfig::default()
    };

    let err = PlayerController::open(config).err().expect("open should fail");
    assert_eq!(err.kind, ErrorKind::Storage);
}

#[test]
fn test_add_player_on_read_only_database() {
    let mut ctl = controller();
    ctl.add_player(&messi()).unwrap();
    ctl.repository().connection().execute_batch("PRAGMA query_only = ON").unwrap();

    let err = ctl.add_player(&messi()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);
    assert!(err.message.ends_with("(nothing was changed)"), "{}", err.message);
    assert_eq!(ctl.list_players().unwrap().len(), 1);
}
