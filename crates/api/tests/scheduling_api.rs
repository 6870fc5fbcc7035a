//! HTTP-level integration tests for the scheduling engine.
//!
//! Exercises the full create / conflict / reschedule / delete flow over the
//! real router and database, including both conflict axes and the fan-out
//! side effects each accepted mutation produces.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, notification_count, post_json, put_json, seed_department, seed_room,
    seed_user, token_for,
};
use sqlx::PgPool;

/// Seeded world shared by most tests.
struct World {
    admin_token: String,
    prof_token: String,
    professor_id: i64,
    other_professor_id: i64,
    department_id: i64,
    room_a: i64,
    room_b: i64,
    students: Vec<i64>,
    outside_student: i64,
}

async fn seed_world(pool: &PgPool) -> World {
    let department_id = seed_department(pool, "Computer Science", "CS").await;
    let other_department = seed_department(pool, "Mechanical", "ME").await;

    let admin_id = seed_user(pool, "admin@campus.test", "admin", None, None).await;
    let professor_id = seed_user(
        pool,
        "prof@campus.test",
        "professor",
        Some(department_id),
        None,
    )
    .await;
    let other_professor_id = seed_user(
        pool,
        "prof2@campus.test",
        "professor",
        Some(department_id),
        None,
    )
    .await;

    let mut students = Vec::new();
    for i in 0..3 {
        students.push(
            seed_user(
                pool,
                &format!("student{i}@campus.test"),
                "student",
                Some(department_id),
                Some("2027"),
            )
            .await,
        );
    }
    // Same batch label in a different department: must never be notified.
    let outside_student = seed_user(
        pool,
        "outsider@campus.test",
        "student",
        Some(other_department),
        Some("2027"),
    )
    .await;

    let room_a = seed_room(pool, "R-101", "classroom").await;
    let room_b = seed_room(pool, "R-102", "classroom").await;

    World {
        admin_token: token_for(admin_id, "admin"),
        prof_token: token_for(professor_id, "professor"),
        professor_id,
        other_professor_id,
        department_id,
        room_a,
        room_b,
        students,
        outside_student,
    }
}

fn entry_body(world: &World, room: i64, professor: i64, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "department_id": world.department_id,
        "batch": "2027",
        "classroom_id": room,
        "professor_id": professor,
        "subject": "Data Structures",
        "day_of_week": 2,
        "start_time": start,
        "end_time": end,
    })
}

// ---------------------------------------------------------------------------
// Create + conflict axes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry_returns_201(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["start_time"], "10:00:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_room_overlap_rejected_with_room_conflict(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same room, same day, overlapping window, different professor.
    let app = common::build_test_app(pool);
    let second = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(
            &world,
            world.room_a,
            world.other_professor_id,
            "10:30",
            "11:25",
        ),
    )
    .await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "ROOM_CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_professor_overlap_rejected_with_professor_conflict(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Different room, same professor, overlapping window.
    let app = common::build_test_app(pool);
    let second = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_b, world.professor_id, "10:30", "11:25"),
    )
    .await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "PROFESSOR_CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_touching_slots_are_not_a_conflict(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "09:00", "09:55"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Ends exactly when the next begins: both must be accepted.
    let app = common::build_test_app(pool);
    let second = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "09:55", "10:50"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inverted_interval_rejected(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "11:00", "10:00"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_day_rejected(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55");
    body["day_of_week"] = serde_json::json!(7);

    let response = post_json(app, "/api/v1/timetable", &world.admin_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_subject_rejected_naming_field(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55");
    body["subject"] = serde_json::json!("   ");

    let response = post_json(app, "/api/v1/timetable", &world.admin_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("subject"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_auditorium_not_valid_for_timetable(pool: PgPool) {
    let world = seed_world(&pool).await;
    let auditorium = seed_room(&pool, "AUD-1", "auditorium").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, auditorium, world.professor_id, "10:00", "10:55"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_admin_role(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/timetable",
        &world.prof_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_no_fields_rejected(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/timetable/{id}"),
        &world.admin_token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_recheck_catches_new_conflict(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let second = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(
            &world,
            world.room_b,
            world.other_professor_id,
            "11:00",
            "11:55",
        ),
    )
    .await;
    let second_id = body_json(second).await["data"]["id"].as_i64().unwrap();

    // Moving the second entry into room A at an overlapping time must fail.
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/timetable/{second_id}"),
        &world.admin_token,
        serde_json::json!({ "classroom_id": world.room_a, "start_time": "10:30", "end_time": "11:25" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ROOM_CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_404(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/timetable/999999",
        &world.admin_token,
        serde_json::json!({ "subject": "Anything" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Reschedule (professor-owned)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reschedule_own_entry_succeeds(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({ "start_time": "11:00", "end_time": "11:55" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["start_time"], "11:00:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reschedule_to_own_slot_excludes_self(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    // Rescheduling to the exact slot the entry already occupies must not
    // conflict with itself.
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({
            "day_of_week": 2,
            "start_time": "10:00",
            "end_time": "10:55",
            "classroom_id": world.room_a,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reschedule_someone_elses_entry_returns_404(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(
            &world,
            world.room_a,
            world.other_professor_id,
            "10:00",
            "10:55",
        ),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({ "start_time": "12:00", "end_time": "12:55" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reschedule_into_auditorium_rejected(pool: PgPool) {
    let world = seed_world(&pool).await;
    let auditorium = seed_room(&pool, "AUD-1", "auditorium").await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({ "classroom_id": auditorium }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rescheduled_entry_appears_in_rescheduled_only_view(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    // Fresh entries are not "rescheduled".
    let app = common::build_test_app(pool.clone());
    let before = get(
        app,
        "/api/v1/professor/my-classes?rescheduled_only=true",
        &world.prof_token,
    )
    .await;
    assert_eq!(body_json(before).await["data"].as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool.clone());
    let reschedule = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({ "start_time": "11:00", "end_time": "11:55" }),
    )
    .await;
    assert_eq!(reschedule.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let after = get(
        app,
        "/api/v1/professor/my-classes?rescheduled_only=true",
        &world.prof_token,
    )
    .await;
    let classes = body_json(after).await;
    let classes = classes["data"].as_array().unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["id"].as_i64().unwrap(), id);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_entry_notifies_with_predeletion_snapshot(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/timetable/{id}"), &world.admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Every matching student got a deletion notice naming the subject.
    for student in &world.students {
        let content: String = sqlx::query_scalar(
            "SELECT content FROM notifications \
             WHERE user_id = $1 AND notification_type = 'timetable_deleted'",
        )
        .bind(student)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(content.contains("Data Structures"));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_returns_404(pool: PgPool) {
    let world = seed_world(&pool).await;
    let app = common::build_test_app(pool);

    let response = delete(app, "/api/v1/timetable/999999", &world.admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Fan-out completeness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_fans_out_to_exactly_matching_students(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Exactly one row per matching student, zero outside the audience.
    for student in &world.students {
        assert_eq!(
            notification_count(&pool, *student, "timetable_created").await,
            1
        );
    }
    assert_eq!(
        notification_count(&pool, world.outside_student, "timetable_created").await,
        0
    );
    assert_eq!(
        notification_count(&pool, world.professor_id, "timetable_created").await,
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reschedule_fans_out_updated_notifications(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/professor/reschedule/{id}"),
        &world.prof_token,
        serde_json::json!({ "start_time": "11:00", "end_time": "11:55" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    for student in &world.students {
        assert_eq!(
            notification_count(&pool, *student, "timetable_updated").await,
            1
        );
    }
    assert_eq!(
        notification_count(&pool, world.outside_student, "timetable_updated").await,
        0
    );
}

// ---------------------------------------------------------------------------
// Available rooms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_available_rooms_excludes_occupied_slot(pool: PgPool) {
    let world = seed_world(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json(
        app,
        "/api/v1/timetable",
        &world.admin_token,
        entry_body(&world, world.room_a, world.professor_id, "10:00", "10:55"),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/timetable/available-rooms?day_of_week=2&start_time=10:30&end_time=11:25",
        &world.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&world.room_a));
    assert!(ids.contains(&world.room_b));
}
