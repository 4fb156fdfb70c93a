use rusqlite::Connection;
use sgames_core::db::open_db_in_memory;
use sgames_core::{
    AthleteField, AthleteInput, AthleteRepository, AthleteService, ContingentInput,
    ContingentRepository, Principal, RepoError, SportInput, SportRepository,
    SqliteAthleteRepository, SqliteContingentRepository, SqliteSportRepository, VersionToken,
};

fn seed_parents(conn: &mut Connection) -> (i64, i64) {
    let contingent = SqliteContingentRepository::new(conn)
        .create_contingent(&ContingentInput {
            code: "ON".to_string(),
            name: "Ontario".to_string(),
        })
        .unwrap();
    let sport = SqliteSportRepository::new(conn)
        .create_sport(
            &SportInput {
                code: "ATH".to_string(),
                name: "Athletics".to_string(),
            },
            &Principal::named("setup"),
        )
        .unwrap();
    (contingent.id, sport.id)
}

fn sample_input(code: &str, contingent_id: i64, sport_id: i64) -> AthleteInput {
    AthleteInput {
        first_name: "Amara".to_string(),
        middle_name: Some("June".to_string()),
        last_name: "Okafor".to_string(),
        athlete_code: code.to_string(),
        dob: "2001-03-14".to_string(),
        height_cm: 170,
        weight_kg: 62.5,
        gender: "W".to_string(),
        affiliation: "Harbor City AC".to_string(),
        contingent_id,
        sport_id,
    }
}

#[test]
fn create_and_get_roundtrip_preserves_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let input = sample_input("1000001", contingent_id, sport_id);
    let created = repo
        .create_athlete(&input, &Principal::named("registrar"))
        .unwrap();

    let loaded = repo.get_athlete(created.id).unwrap().unwrap();
    assert_eq!(loaded.first_name, input.first_name);
    assert_eq!(loaded.middle_name, input.middle_name);
    assert_eq!(loaded.last_name, input.last_name);
    assert_eq!(loaded.athlete_code, input.athlete_code);
    assert_eq!(loaded.dob, input.dob);
    assert_eq!(loaded.height_cm, input.height_cm);
    assert_eq!(loaded.weight_kg, input.weight_kg);
    assert_eq!(loaded.gender, input.gender);
    assert_eq!(loaded.affiliation, input.affiliation);
    assert_eq!(loaded.contingent.id, contingent_id);
    assert_eq!(loaded.contingent.code, "ON");
    assert_eq!(loaded.sport.id, sport_id);
    assert_eq!(loaded.sport.code, "ATH");
    assert!(!loaded.row_version.as_str().is_empty());
    assert_eq!(loaded.row_version, created.row_version);
}

#[test]
fn create_rejects_invalid_input_before_touching_the_store() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let input = AthleteInput {
        first_name: String::new(),
        athlete_code: "12".to_string(),
        gender: "X".to_string(),
        ..sample_input("1000001", contingent_id, sport_id)
    };
    let err = repo
        .create_athlete(&input, &Principal::fallback())
        .unwrap_err();

    match err {
        RepoError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
            let fields: Vec<_> = errors.iter().map(|error| error.field).collect();
            assert!(fields.contains(&AthleteField::FirstName));
            assert!(fields.contains(&AthleteField::AthleteCode));
            assert!(fields.contains(&AthleteField::Gender));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(repo.list_athletes(&Default::default()).unwrap().is_empty());
}

#[test]
fn duplicate_athlete_code_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    repo.create_athlete(
        &sample_input("7777777", contingent_id, sport_id),
        &Principal::fallback(),
    )
    .unwrap();

    let second = AthleteInput {
        first_name: "Noor".to_string(),
        last_name: "Haddad".to_string(),
        ..sample_input("7777777", contingent_id, sport_id)
    };
    let err = repo
        .create_athlete(&second, &Principal::fallback())
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateCode));

    assert_eq!(repo.list_athletes(&Default::default()).unwrap().len(), 1);
}

#[test]
fn create_with_absent_parent_names_the_missing_reference() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let err = repo
        .create_athlete(
            &sample_input("1000001", contingent_id, 9999),
            &Principal::fallback(),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParent("sport_id")));

    let err = repo
        .create_athlete(
            &sample_input("1000001", 9999, sport_id),
            &Principal::fallback(),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParent("contingent_id")));
}

#[test]
fn update_replaces_all_fields_and_advances_the_token() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input("1000001", contingent_id, sport_id),
            &Principal::named("registrar"),
        )
        .unwrap();

    let replacement = AthleteInput {
        first_name: "Maya".to_string(),
        middle_name: None,
        weight_kg: 58.0,
        affiliation: "Riverside TC".to_string(),
        ..sample_input("1000001", contingent_id, sport_id)
    };
    let updated = repo
        .update_athlete(
            created.id,
            &replacement,
            &created.row_version,
            &Principal::named("coach"),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name, "Maya");
    assert_eq!(updated.middle_name, None);
    assert_eq!(updated.weight_kg, 58.0);
    assert_eq!(updated.affiliation, "Riverside TC");
    assert_ne!(updated.row_version, created.row_version);
}

#[test]
fn update_with_stale_token_conflicts_and_never_mutates_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input("1000001", contingent_id, sport_id),
            &Principal::fallback(),
        )
        .unwrap();

    let first_update = AthleteInput {
        affiliation: "First Writer AC".to_string(),
        ..sample_input("1000001", contingent_id, sport_id)
    };
    let current = repo
        .update_athlete(
            created.id,
            &first_update,
            &created.row_version,
            &Principal::named("first"),
        )
        .unwrap();

    // Second writer replays the token it read before the first update won.
    let second_update = AthleteInput {
        affiliation: "Second Writer AC".to_string(),
        ..sample_input("1000001", contingent_id, sport_id)
    };
    let err = repo
        .update_athlete(
            created.id,
            &second_update,
            &created.row_version,
            &Principal::named("second"),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::ConflictStale));

    let loaded = repo.get_athlete(created.id).unwrap().unwrap();
    assert_eq!(loaded.affiliation, "First Writer AC");
    assert_eq!(loaded.row_version, current.row_version);
}

#[test]
fn update_of_vanished_row_reports_conflict_missing() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let err = repo
        .update_athlete(
            424242,
            &sample_input("1000001", contingent_id, sport_id),
            &VersionToken::generate(),
            &Principal::fallback(),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::ConflictMissing));
}

#[test]
fn delete_with_current_token_removes_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input("1000001", contingent_id, sport_id),
            &Principal::fallback(),
        )
        .unwrap();

    repo.delete_athlete(created.id, &created.row_version)
        .unwrap();
    assert!(repo.get_athlete(created.id).unwrap().is_none());
}

#[test]
fn delete_with_stale_token_conflicts_and_keeps_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input("1000001", contingent_id, sport_id),
            &Principal::fallback(),
        )
        .unwrap();
    repo.update_athlete(
        created.id,
        &sample_input("1000001", contingent_id, sport_id),
        &created.row_version,
        &Principal::fallback(),
    )
    .unwrap();

    let err = repo
        .delete_athlete(created.id, &created.row_version)
        .unwrap_err();
    assert!(matches!(err, RepoError::ConflictStale));
    assert!(repo.get_athlete(created.id).unwrap().is_some());
}

#[test]
fn delete_of_absent_row_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let err = repo
        .delete_athlete(424242, &VersionToken::generate())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(424242)));
}

#[test]
fn service_maps_absent_point_lookup_to_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_parents(&mut conn);
    let service = AthleteService::new(SqliteAthleteRepository::new(&mut conn));

    let err = service.get_athlete(424242).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(424242)));
}
