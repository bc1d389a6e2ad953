use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequirePrincipal;
use crate::models::assignments::requests::GradeAssignmentRequest;
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出已提交/已评分作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req).await
}

// 列出教师名下作业
pub async fn list_teacher_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_teacher_assignments(&req).await
}

// 评分
pub async fn grade_assignment(
    req: HttpRequest,
    body: web::Json<GradeAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_assignment(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/principal")
            .wrap(RequirePrincipal)
            .route("/assignments", web::get().to(list_assignments))
            .route("/assignments/grade", web::post().to(grade_assignment))
            .route("/teachers", web::get().to(list_teacher_assignments)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::middlewares::PRINCIPAL_HEADER;
    use crate::models::assignments::entities::{AssignmentState, Grade};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::test_utils::{
        seed_assignment, seed_assignment_with_id, seed_principal, setup_test_storage, shared,
    };
    use crate::utils::json_config;

    const P1: &str = r#"{"user_id":"u1","principal_id":"p1"}"#;

    macro_rules! init_app {
        ($storage:expr) => {
            init_app!($storage, 1_048_576)
        };
        ($storage:expr, $max_payload_size:expr) => {
            test::init_service(
                App::new()
                    .app_data(json_config($max_payload_size))
                    .app_data(web::Data::new($storage))
                    .configure(configure_assignment_routes),
            )
            .await
        };
    }

    async fn storage_with_p1() -> SeaOrmStorage {
        let storage = setup_test_storage().await;
        seed_principal(&storage, "p1", "u1").await;
        storage
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized_everywhere() {
        let app = init_app!(shared(storage_with_p1().await));

        let requests = [
            test::TestRequest::get().uri("/principal/assignments"),
            test::TestRequest::get().uri("/principal/teachers"),
            test::TestRequest::post()
                .uri("/principal/assignments/grade")
                .set_json(json!({ "id": 1, "grade": "A" })),
        ];
        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Unauthorized" }));
        }
    }

    #[actix_web::test]
    async fn test_invalid_tokens_are_unauthorized() {
        let app = init_app!(shared(storage_with_p1().await));

        let tokens = [
            "not json",
            r#"{"user_id":"u1"}"#,
            r#"{"principal_id":"p1"}"#,
            r#"{"user_id":"u2","principal_id":"p1"}"#,
        ];
        for token in tokens {
            let requests = [
                test::TestRequest::get().uri("/principal/assignments"),
                test::TestRequest::get().uri("/principal/teachers"),
                test::TestRequest::post()
                    .uri("/principal/assignments/grade")
                    .set_json(json!({ "id": 1, "grade": "A" })),
            ];
            for req in requests {
                let req = req.insert_header((PRINCIPAL_HEADER, token)).to_request();
                let path = req.path().to_string();
                let resp = test::call_service(&app, req).await;
                assert_eq!(
                    resp.status(),
                    StatusCode::UNAUTHORIZED,
                    "token: {token}, path: {path}"
                );
            }
        }
    }

    #[actix_web::test]
    async fn test_non_ascii_principal_header_is_accepted() {
        let storage = setup_test_storage().await;
        seed_principal(&storage, "p1", "李雷").await;
        seed_assignment(&storage, AssignmentState::Submitted, Some("李雷"), None).await;
        let app = init_app!(shared(storage));

        let req = test::TestRequest::get()
            .uri("/principal/teachers")
            .insert_header((PRINCIPAL_HEADER, r#"{"user_id":"李雷","principal_id":"p1"}"#))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"][0]["user_id"], "李雷");
    }

    #[actix_web::test]
    async fn test_list_assignments_hides_drafts() {
        let storage = storage_with_p1().await;
        seed_assignment(&storage, AssignmentState::Draft, Some("u1"), None).await;
        let submitted =
            seed_assignment(&storage, AssignmentState::Submitted, Some("u2"), None).await;
        let graded =
            seed_assignment(&storage, AssignmentState::Graded, Some("u3"), Some(Grade::C)).await;
        let app = init_app!(shared(storage));

        let req = test::TestRequest::get()
            .uri("/principal/assignments")
            .insert_header((PRINCIPAL_HEADER, P1))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], submitted.id);
        assert_eq!(data[0]["state"], "SUBMITTED");
        assert_eq!(data[0]["grade"], Value::Null);
        assert_eq!(data[1]["id"], graded.id);
        assert_eq!(data[1]["state"], "GRADED");
        assert_eq!(data[1]["grade"], "C");
        for key in [
            "content",
            "student_id",
            "teacher_id",
            "created_at",
            "updated_at",
        ] {
            assert!(data[0].get(key).is_some(), "missing {key}");
        }
    }

    #[actix_web::test]
    async fn test_list_assignments_empty() {
        let app = init_app!(shared(storage_with_p1().await));

        let req = test::TestRequest::get()
            .uri("/principal/assignments")
            .insert_header((PRINCIPAL_HEADER, P1))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "data": [] }));
    }

    #[actix_web::test]
    async fn test_teacher_listing_is_scoped_to_caller() {
        let storage = storage_with_p1().await;
        let mine = seed_assignment(&storage, AssignmentState::Draft, Some("u1"), None).await;
        seed_assignment(&storage, AssignmentState::Submitted, Some("u2"), None).await;
        let app = init_app!(shared(storage));

        let req = test::TestRequest::get()
            .uri("/principal/teachers")
            .insert_header((PRINCIPAL_HEADER, P1))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], mine.id);
        assert_eq!(data[0]["user_id"], "u1");
        assert!(data[0].get("content").is_none());
        assert!(data[0].get("grade").is_none());
    }

    #[actix_web::test]
    async fn test_grade_by_owner_succeeds() {
        let storage = storage_with_p1().await;
        seed_assignment_with_id(&storage, 5, AssignmentState::Submitted, Some("u1")).await;
        let storage = shared(storage);
        let app = init_app!(storage.clone());

        let req = test::TestRequest::post()
            .uri("/principal/assignments/grade")
            .insert_header((PRINCIPAL_HEADER, P1))
            .set_json(json!({ "id": 5, "grade": "A" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], 5);
        assert_eq!(body["data"]["state"], "GRADED");
        assert_eq!(body["data"]["grade"], "A");

        let stored = storage.find_assignment(5).await.unwrap().unwrap();
        assert_eq!(stored.state, AssignmentState::Graded);
        assert_eq!(stored.grade, Some(Grade::A));
    }

    #[actix_web::test]
    async fn test_grade_by_other_teacher_is_forbidden() {
        let storage = storage_with_p1().await;
        seed_assignment_with_id(&storage, 5, AssignmentState::Submitted, Some("u2")).await;
        let storage = shared(storage);
        let app = init_app!(storage.clone());

        let req = test::TestRequest::post()
            .uri("/principal/assignments/grade")
            .insert_header((PRINCIPAL_HEADER, P1))
            .set_json(json!({ "id": 5, "grade": "A" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Unauthorized to grade this assignment" }));

        let stored = storage.find_assignment(5).await.unwrap().unwrap();
        assert_eq!(stored.state, AssignmentState::Submitted);
        assert_eq!(stored.grade, None);
    }

    #[actix_web::test]
    async fn test_grade_missing_assignment_is_not_found() {
        let storage = storage_with_p1().await;
        let other = seed_assignment(&storage, AssignmentState::Submitted, Some("u1"), None).await;
        let storage = shared(storage);
        let app = init_app!(storage.clone());

        let req = test::TestRequest::post()
            .uri("/principal/assignments/grade")
            .insert_header((PRINCIPAL_HEADER, P1))
            .set_json(json!({ "id": 999, "grade": "B" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Assignment not found" }));

        let untouched = storage.find_assignment(other.id).await.unwrap().unwrap();
        assert_eq!(untouched.grade, None);
    }

    #[actix_web::test]
    async fn test_grade_with_invalid_payload_is_bad_request() {
        let storage = storage_with_p1().await;
        seed_assignment_with_id(&storage, 5, AssignmentState::Submitted, Some("u1")).await;
        let app = init_app!(shared(storage));

        let payloads = [
            json!({ "id": 5, "grade": "Z" }),
            json!({ "id": 5 }),
            json!({ "grade": "A" }),
            json!({ "id": "five", "grade": "A" }),
        ];
        for payload in payloads {
            let req = test::TestRequest::post()
                .uri("/principal/assignments/grade")
                .insert_header((PRINCIPAL_HEADER, P1))
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].is_string());
        }
    }

    #[actix_web::test]
    async fn test_oversized_grade_body_is_rejected() {
        let storage = storage_with_p1().await;
        seed_assignment_with_id(&storage, 5, AssignmentState::Submitted, Some("u1")).await;
        let storage = shared(storage);
        let app = init_app!(storage.clone(), 1024);

        let req = test::TestRequest::post()
            .uri("/principal/assignments/grade")
            .insert_header((PRINCIPAL_HEADER, P1))
            .set_json(json!({ "id": 5, "grade": "A", "padding": "x".repeat(100 * 1024) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Request body is too large" }));

        let stored = storage.find_assignment(5).await.unwrap().unwrap();
        assert_eq!(stored.state, AssignmentState::Submitted);
        assert_eq!(stored.grade, None);
    }

    #[actix_web::test]
    async fn test_authentication_precedes_validation() {
        let app = init_app!(shared(storage_with_p1().await));

        let req = test::TestRequest::post()
            .uri("/principal/assignments/grade")
            .insert_header((PRINCIPAL_HEADER, r#"{"user_id":"u1","principal_id":"nope"}"#))
            .set_json(json!({ "grade": "Z" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
