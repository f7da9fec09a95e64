use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use coursemap::configure;
use coursemap::models::CourseSection;
use coursemap::store::Store;
use serde_json::{json, Value};

fn section(title: &str, sec: &str, instructor: &str, dates: &str) -> CourseSection {
    CourseSection {
        course_number: 0,
        course_title: title.to_string(),
        course_topic: String::new(),
        section: sec.to_string(),
        days_and_times: "MoWe 09:15AM - 10:30AM".to_string(),
        room: "SB B145".to_string(),
        instructor: instructor.to_string(),
        instruction_mode: "In Person".to_string(),
        meeting_dates: dates.to_string(),
    }
}

fn seeded_store() -> Store {
    let store = Store::open_in_memory().unwrap();
    store.insert_section(&section("CSCI 111", "01", "Ada", "08/26/2025 - 12/22/2025")).unwrap();
    store.insert_section(&section("CSCI 111", "02", "Bo", "08/26/2025 - 12/22/2025")).unwrap();
    store.insert_section(&section("MATH 120", "01", "Cy", "01/05/2026 - 01/23/2026")).unwrap();
    store.seed_professor_ratings().unwrap();
    store
}

macro_rules! app {
    ($store:expr) => {
        test::init_service(App::new().app_data(web::Data::new($store)).configure(configure)).await
    };
}

#[actix_web::test]
async fn courses_by_title_are_ordered_by_rating() {
    let store = seeded_store();
    store.post_review("Bo", "u1", 5, None).unwrap();
    store.post_review("Ada", "u1", 3, None).unwrap();
    let app = app!(store);

    let req = test::TestRequest::get().uri("/api/courses?title=CSCI%20111").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["instructor"], "Bo");
    assert_eq!(rows[0]["avgRating"], 5.0);
    assert_eq!(rows[1]["ratingCount"], 1);
}

#[actix_web::test]
async fn term_endpoints_validate_and_filter() {
    let app = app!(seeded_store());

    let req = test::TestRequest::get().uri("/api/courses/term-titles?term=winter").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!(["MATH 120"]));

    let req = test::TestRequest::get().uri("/api/courses/term-sections?title=CSCI%20111").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Title and term are required");

    let req = test::TestRequest::get().uri("/api/courses?term=summer").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn reviews_reject_bad_ratings() {
    let app = app!(seeded_store());

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(json!({"instructor": "Ada", "userId": "u1", "rating": 9}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(json!({"instructor": "Ada", "userId": "u1", "rating": 4, "comment": "clear"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/reviews?instructor=Ada").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["comment"], "clear");
}

#[actix_web::test]
async fn user_creation_and_mandatory_courses() {
    let app = app!(Store::open_in_memory().unwrap());

    let req = test::TestRequest::post()
        .uri("/api/userData")
        .set_json(json!({"userId": "u1", "email": "u1@example.edu"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/userData")
        .set_json(json!({"userId": "u1", "email": "again@example.edu"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "u1@example.edu");

    let req = test::TestRequest::get().uri("/api/userData?userId=nobody").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri("/api/userMandatoryCourses/u1")
        .set_json(json!({"CSCI_111": true}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::patch()
        .uri("/api/userMandatoryCourses/u1")
        .set_json(json!({"CS_111": true}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/userMandatoryCourses/u1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["CSCI_111"], true);
    assert_eq!(body["MATH_141"], false);
}

#[actix_web::test]
async fn schedules_replace_and_delete() {
    let app = app!(Store::open_in_memory().unwrap());

    let req = test::TestRequest::get().uri("/api/schedules?userId=u1&term=fall").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_null());

    let schedule = json!([{"day": "Mon", "startTime": "09:15", "endTime": "10:30", "class": "CSCI 111:01", "color": "#a64d5d"}]);
    let req = test::TestRequest::post()
        .uri("/api/schedules")
        .set_json(json!({"userId": "u1", "term": "fall", "schedule": schedule}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/schedules?userId=u1&term=fall").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["schedule"][0]["class"], "CSCI 111:01");
    assert_eq!(body["schedule"][0]["day"], "Mon");

    let req = test::TestRequest::delete().uri("/api/schedules?userId=u1&term=fall").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deleted"], true);
}

#[actix_web::test]
async fn schedules_keep_client_fields() {
    let app = app!(Store::open_in_memory().unwrap());
    let schedule = json!([
        {"day": "Mon", "startTime": "09:00", "endTime": "10:00", "class": "A:01",
         "color": "#fff", "courseTitle": "A", "extra": 1},
        {"day": "Monday", "class": "B:01"}
    ]);
    let req = test::TestRequest::post()
        .uri("/api/schedules")
        .set_json(json!({"userId": "u1", "term": "spring", "schedule": schedule}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/schedules?userId=u1&term=spring").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["schedule"], schedule);
    assert!(body["schedule"][0].get("instructor").is_none());
}

#[actix_web::test]
async fn planner_reports_conflicts_as_409() {
    let app = app!(Store::open_in_memory().unwrap());
    let first = json!({
        "courseTitle": "CSCI 111", "section": "01", "daysAndTimes": "MoWe 09:15AM - 10:30AM"
    });
    let req = test::TestRequest::post()
        .uri("/api/planner/add-section")
        .set_json(json!({"term": "fall", "events": [], "section": first}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].clone();
    assert_eq!(events.as_array().unwrap().len(), 2);

    let clash = json!({
        "courseTitle": "MATH 141", "section": "02", "daysAndTimes": "We 10:00AM - 10:50AM"
    });
    let req = test::TestRequest::post()
        .uri("/api/planner/add-section")
        .set_json(json!({"term": "fall", "events": events, "section": clash}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Time conflict detected on Wed from 10:00AM to 10:50AM. Please choose a different section."
    );
}

#[actix_web::test]
async fn planner_tolerates_malformed_existing_times() {
    let app = app!(Store::open_in_memory().unwrap());
    let events = json!([
        {"day": "Mon", "startTime": "99999999:00", "endTime": "10:00", "class": "A:01"},
        {"day": "Tue", "startTime": "ab:cd", "endTime": "4294967295:4294967295", "class": "B:01"}
    ]);
    let section = json!({
        "courseTitle": "CSCI 111", "section": "01", "daysAndTimes": "We 09:15AM - 10:30AM"
    });
    let req = test::TestRequest::post()
        .uri("/api/planner/add-section")
        .set_json(json!({"term": "fall", "events": events, "section": section}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 3);

    // the overflowing start counts as midnight, so 09:15 Monday still clashes
    let monday = json!({
        "courseTitle": "MATH 141", "section": "02", "daysAndTimes": "Mo 09:15AM - 10:30AM"
    });
    let req = test::TestRequest::post()
        .uri("/api/planner/add-section")
        .set_json(json!({"term": "fall", "events": body["events"], "section": monday}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn progress_toggle_persists_batched_updates() {
    let store = Store::open_in_memory().unwrap();
    store.create_user("u1", "u1@example.edu").unwrap();
    let app = app!(store);

    for course in ["CS_111", "CS_240"] {
        let req = test::TestRequest::post()
            .uri("/api/progress/u1/toggle")
            .set_json(json!({"courseId": course}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["persisted"], true);
    }

    let req = test::TestRequest::post()
        .uri("/api/progress/u1/toggle")
        .set_json(json!({"courseId": "CS_111"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["action"], "uncompleted");
    assert_eq!(body["updates"], json!({"CS_111": false, "CS_240": false}));
    assert_eq!(body["completed"], json!([]));

    let req = test::TestRequest::get().uri("/api/progress/u1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["completed"], json!([]));
    assert_eq!(body["unlocked"], json!(["CS_111", "MATH_122"]));

    let req = test::TestRequest::post()
        .uri("/api/progress/u1/toggle")
        .set_json(json!({"courseId": "CS_999"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/progress/ghost").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
