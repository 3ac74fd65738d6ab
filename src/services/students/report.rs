use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{StudentService, load_student_for};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;
use crate::services::access::{Operation, require_area};
use crate::services::reports::{self, ReportSource, ReportStyle, build_report, report_filename};
use crate::services::{current_user, denial_response, error_response};

pub async fn download_report(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Parent) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let (student, class) =
        match load_student_for(&storage, &user, student_id, Operation::View, true).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    let results = match storage.list_results_for_student(student.id).await {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    // 成绩单显示班级所在学年
    let academic_year = match storage.get_academic_year_by_id(class.academic_year_id).await {
        Ok(year) => year,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    let config = AppConfig::get();
    let generated_on = Utc::now().date_naive();
    let doc = build_report(&ReportSource {
        school_name: &config.app.school_name,
        student: &student,
        class: &class,
        academic_year: academic_year.as_ref(),
        results: &results,
        generated_on,
    });

    let bytes = match reports::render_pdf(&doc, &ReportStyle::from(&config.report)) {
        Ok(bytes) => bytes,
        Err(e) => return Ok(error_response(&e, ErrorCode::ReportRenderFailed)),
    };

    let filename = report_filename(&student.student_id, generated_on);
    info!(
        "Report card for student {} downloaded by parent {} ({} bytes)",
        student.student_id,
        user.id,
        bytes.len()
    );

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{HttpMessage, http::StatusCode, http::header::LOCATION, test, web};
    use chrono::NaiveDate;

    use super::*;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::access::PARENT_LANDING;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, user};

    #[actix_web::test]
    async fn test_parent_cannot_download_other_childs_report() {
        let db = memory_storage().await;
        let teacher = user(&db, "teacher1", UserRole::Teacher).await;
        let owner = user(&db, "parent1", UserRole::Parent).await;
        let stranger = user(&db, "parent2", UserRole::Parent).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3A", teacher.id, year.id).await.unwrap();
        let student = storage
            .create_student(
                class.id,
                CreateStudentRequest {
                    student_id: "S-001".to_string(),
                    first_name: "Amani".to_string(),
                    last_name: "Otieno".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(2016, 4, 2).unwrap(),
                    parent_id: Some(owner.id),
                },
            )
            .await
            .unwrap();

        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        request.extensions_mut().insert(stranger);

        let resp = download_report(&StudentService::new_lazy(), &request, student.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), PARENT_LANDING);
        assert_ne!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
    }
}
