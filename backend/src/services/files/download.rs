use crate::artifactory::is_success;
use crate::services::errors::{json_error, remote_status};
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::requests::FileQuery;
use log::{error, warn};
use mime_guess::from_path;

const DOWNLOAD_ERROR: &str = "Error downloading file";

/// HTTP handler for `GET /api/download_file`.
///
/// Serves the remote object as an attachment named after the last segment of
/// its parsed URL. A non-success answer from the repository is passed through
/// with its status; an unreachable repository is a `502 Bad Gateway`.
pub async fn process(state: web::Data<AppState>, query: web::Query<FileQuery>) -> HttpResponse {
    let path = state.artifact_root.path_for(
        &query.nf_name,
        &query.version_name,
        &query.section,
        &query.file_name,
    );

    let fetched = match state.artifacts.get(&path).await {
        Ok(fetched) => fetched,
        Err(e) => {
            error!("Failed to fetch {} from Artifactory: {}", path.url(), e);
            return json_error(StatusCode::BAD_GATEWAY, DOWNLOAD_ERROR);
        }
    };

    if !is_success(fetched.status) {
        warn!("Artifactory answered {} to GET {}", fetched.status, path.url());
        return json_error(remote_status(fetched.status), DOWNLOAD_ERROR);
    }

    let file_name = path.file_name();
    let mime = from_path(&file_name).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(fetched.body)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{remote_url, test_app, test_context};
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn streams_the_remote_object_as_an_attachment() {
        let ctx = test_context();
        ctx.artifacts.insert(
            &remote_url("UPF", "v1.0.0", "networking", "spec.pdf"),
            b"%PDF-1.7",
        );
        let app = test_app!(ctx.state.clone());

        let req = test::TestRequest::get()
            .uri("/api/download_file?nf_name=UPF&version_name=v1.0.0&section=networking&file_name=spec.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"spec.pdf\""
        );
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), b"%PDF-1.7");
    }

    #[actix_web::test]
    async fn attachment_name_is_the_encoded_path_segment() {
        let ctx = test_context();
        ctx.artifacts.insert(
            &remote_url("UPF", "v1.0.0", "networking", "design notes.txt"),
            b"notes",
        );
        let app = test_app!(ctx.state.clone());

        let req = test::TestRequest::get()
            .uri("/api/download_file?nf_name=UPF&version_name=v1.0.0&section=networking&file_name=design%20notes.txt")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("design%20notes.txt"), "{}", disposition);
    }

    #[actix_web::test]
    async fn remote_status_is_passed_through_on_failure() {
        let ctx = test_context();
        let app = test_app!(ctx.state.clone());

        let req = test::TestRequest::get()
            .uri("/api/download_file?nf_name=UPF&version_name=v1.0.0&section=networking&file_name=missing.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Error downloading file"}));
    }

    #[actix_web::test]
    async fn unauthorized_repository_answer_is_passed_through() {
        let ctx = test_context();
        ctx.artifacts.fail_with(401);
        let app = test_app!(ctx.state.clone());

        let req = test::TestRequest::get()
            .uri("/api/download_file?nf_name=UPF&version_name=v1.0.0&section=networking&file_name=spec.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
