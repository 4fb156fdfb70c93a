use rusqlite::Connection;
use sgames_core::db::open_db_in_memory;
use sgames_core::{
    AthleteInput, AthleteRepository, ContingentInput, ContingentRepository, Principal, SportInput,
    SportRepository, SqliteAthleteRepository, SqliteContingentRepository, SqliteSportRepository,
};
use std::collections::HashSet;

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

fn sample_input(contingent_id: i64, sport_id: i64) -> AthleteInput {
    AthleteInput {
        first_name: "Amara".to_string(),
        middle_name: None,
        last_name: "Okafor".to_string(),
        athlete_code: "1000001".to_string(),
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
fn create_stamps_identical_created_and_updated_pairs() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input(contingent_id, sport_id),
            &Principal::named("registrar"),
        )
        .unwrap();

    assert_eq!(created.audit.created_by, "registrar");
    assert_eq!(created.audit.updated_by, "registrar");
    assert_eq!(created.audit.created_on, created.audit.updated_on);
    assert!(created.audit.created_on > 0);
}

#[test]
fn update_refreshes_only_the_updated_pair() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(
            &sample_input(contingent_id, sport_id),
            &Principal::named("registrar"),
        )
        .unwrap();
    let updated = repo
        .update_athlete(
            created.id,
            &sample_input(contingent_id, sport_id),
            &created.row_version,
            &Principal::named("coach"),
        )
        .unwrap();

    assert_eq!(updated.audit.created_by, "registrar");
    assert_eq!(updated.audit.created_on, created.audit.created_on);
    assert_eq!(updated.audit.updated_by, "coach");
    assert!(updated.audit.updated_on >= created.audit.updated_on);
}

#[test]
fn unauthenticated_writes_record_the_fallback_principal() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let created = repo
        .create_athlete(&sample_input(contingent_id, sport_id), &Principal::fallback())
        .unwrap();

    assert_eq!(created.audit.created_by, "Unknown");
    assert_eq!(created.audit.updated_by, "Unknown");
}

#[test]
fn every_successful_update_issues_a_fresh_token() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    let mut repo = SqliteAthleteRepository::new(&mut conn);

    let mut record = repo
        .create_athlete(&sample_input(contingent_id, sport_id), &Principal::fallback())
        .unwrap();

    let mut seen = HashSet::new();
    seen.insert(record.row_version.as_str().to_string());

    for _ in 0..5 {
        let expected = record.row_version.clone();
        record = repo
            .update_athlete(
                record.id,
                &sample_input(contingent_id, sport_id),
                &expected,
                &Principal::fallback(),
            )
            .unwrap();
        assert_ne!(record.row_version, expected);
        assert!(
            seen.insert(record.row_version.as_str().to_string()),
            "token was reused"
        );
    }
}

#[test]
fn sport_writes_follow_the_same_audit_and_token_protocol() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteSportRepository::new(&mut conn);

    let sport = repo
        .create_sport(
            &SportInput {
                code: "SWM".to_string(),
                name: "Swimming".to_string(),
            },
            &Principal::named("organizer"),
        )
        .unwrap();

    assert_eq!(sport.audit.created_by, "organizer");
    assert_eq!(sport.audit.created_on, sport.audit.updated_on);
    assert_eq!(sport.row_version.as_str().len(), 32);
    assert_eq!(sport.athlete_count, 0);
}

#[test]
fn parent_records_count_their_dependent_athletes() {
    let mut conn = open_db_in_memory().unwrap();
    let (contingent_id, sport_id) = seed_parents(&mut conn);
    {
        let mut repo = SqliteAthleteRepository::new(&mut conn);
        repo.create_athlete(&sample_input(contingent_id, sport_id), &Principal::fallback())
            .unwrap();
        repo.create_athlete(
            &AthleteInput {
                athlete_code: "1000002".to_string(),
                last_name: "Brook".to_string(),
                ..sample_input(contingent_id, sport_id)
            },
            &Principal::fallback(),
        )
        .unwrap();
    }

    let contingent = SqliteContingentRepository::new(&mut conn)
        .get_contingent(contingent_id)
        .unwrap()
        .unwrap();
    assert_eq!(contingent.athlete_count, 2);

    let sport = SqliteSportRepository::new(&mut conn)
        .get_sport(sport_id)
        .unwrap()
        .unwrap();
    assert_eq!(sport.athlete_count, 2);
}
