use std::net::IpAddr;

use autocare_core_health_contracts::HealthFeatureService;
use autocare_core_service_request_contracts::ServiceRequestFeatureService;
use autocare_di::Build;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, ServiceRequest> {
    health: Health,
    service_request: ServiceRequest,
}

impl<Health, ServiceRequest> RestServer<Health, ServiceRequest>
where
    Health: HealthFeatureService,
    ServiceRequest: ServiceRequestFeatureService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::pages::router())
            .merge(routes::health::router(self.health.into()))
            .merge(routes::service_request::router(self.service_request.into()));

        // request ids must be assigned before the trace span is created
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

#[cfg(test)]
mod tests {
    use autocare_assets::ASSETS;
    use autocare_core_health_contracts::{HealthStatus, MockHealthFeatureService};
    use autocare_core_service_request_contracts::{
        MockServiceRequestFeatureService, ServiceRequestSubmitError,
    };
    use autocare_models::service_request::{
        rules::FormRules, FieldError, FieldErrors, FormField, ServiceRequestForm, ServiceType,
    };
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    type Sut = RestServer<MockHealthFeatureService, MockServiceRequestFeatureService>;

    fn sut(service_request: MockServiceRequestFeatureService) -> Sut {
        RestServer {
            health: MockHealthFeatureService::new(),
            service_request,
        }
    }

    fn form() -> ServiceRequestForm {
        ServiceRequestForm {
            name: Some("Jo".into()),
            phone: Some("555-123-4567".into()),
            location: Some("Springfield".into()),
            service_type: Some("general".into()),
            message: Some("hi".into()),
            ..Default::default()
        }
    }

    fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/send-contact-form")
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(
        sut: RestServer<impl HealthFeatureService, impl ServiceRequestFeatureService>,
        request: Request<Body>,
    ) -> Response {
        sut.router().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let service_request = MockServiceRequestFeatureService::new().with_submit(form(), Ok(()));
        let body = json!({
            "name": "Jo",
            "phone": "555-123-4567",
            "location": "Springfield",
            "service-type": "general",
            "message": "hi",
        });

        // Act
        let response = send(
            sut(service_request),
            post("application/json", body.to_string()),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("X-Request-Id"));
        assert_eq!(
            json_body(response).await,
            json!({"success": true, "message": "Message sent successfully!"})
        );
    }

    #[tokio::test]
    async fn submit_invalid() {
        // Arrange
        let form = ServiceRequestForm {
            location: None,
            ..form()
        };
        let errors = [(FormField::Location, FieldError::Required)]
            .into_iter()
            .collect::<FieldErrors>();
        let service_request = MockServiceRequestFeatureService::new()
            .with_submit(form, Err(ServiceRequestSubmitError::Invalid(errors)));
        let body = json!({
            "name": "Jo",
            "phone": "555-123-4567",
            "service-type": "general",
            "message": "hi",
        });

        // Act
        let response = send(
            sut(service_request),
            post("application/json", body.to_string()),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({
                "success": false,
                "message": "Location is required.",
                "errors": {"location": "Location is required."},
            })
        );
    }

    #[tokio::test]
    async fn submit_invalid_reports_first_field() {
        // Arrange
        let errors = [
            (FormField::ServiceType, FieldError::Required),
            (FormField::Phone, FieldError::Invalid),
            (FormField::Name, FieldError::Required),
        ]
        .into_iter()
        .collect::<FieldErrors>();
        let service_request = MockServiceRequestFeatureService::new().with_submit(
            ServiceRequestForm::default(),
            Err(ServiceRequestSubmitError::Invalid(errors)),
        );

        // Act
        let response = send(sut(service_request), post("application/json", "{}")).await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Name is required.");
        assert_eq!(body["errors"].as_object().unwrap().len(), 3);
        assert_eq!(body["errors"]["phone"], "Invalid phone number format.");
    }

    #[tokio::test]
    async fn submit_send_failed() {
        // Arrange
        let service_request = MockServiceRequestFeatureService::new()
            .with_submit(form(), Err(ServiceRequestSubmitError::Send));
        let body = "name=Jo&phone=555-123-4567&location=Springfield&service-type=general&message=hi";

        // Act
        let response = send(
            sut(service_request),
            post("application/x-www-form-urlencoded", body),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({
                "success": false,
                "message": "Failed to send message. Please try again later.",
            })
        );
    }

    #[tokio::test]
    async fn submit_oil_change_form_encoded() {
        // Arrange
        let form = ServiceRequestForm {
            service_type: Some("oil-change".into()),
            message: None,
            vehicle_make: Some("Toyota".into()),
            vehicle_model: Some("Corolla".into()),
            vehicle_year: Some("2018".into()),
            license_plate: Some("ABC 123".into()),
            ..form()
        };
        let service_request = MockServiceRequestFeatureService::new().with_submit(form, Ok(()));
        let body = "name=Jo&phone=555-123-4567&location=Springfield&service-type=oil-change\
                    &vehicle-make=Toyota&vehicle-model=Corolla&vehicle-year=2018&license-plate=ABC+123";

        // Act
        let response = send(
            sut(service_request),
            post("application/x-www-form-urlencoded", body),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn submit_numeric_year() {
        // Arrange
        let form = ServiceRequestForm {
            service_type: Some("oil-change".into()),
            message: None,
            vehicle_make: Some("Toyota".into()),
            vehicle_model: Some("Corolla".into()),
            vehicle_year: Some("2018".into()),
            license_plate: Some("ABC-1234".into()),
            ..form()
        };
        let service_request = MockServiceRequestFeatureService::new().with_submit(form, Ok(()));
        let body = json!({
            "name": "Jo",
            "phone": "555-123-4567",
            "location": "Springfield",
            "service-type": "oil-change",
            "vehicle-make": "Toyota",
            "vehicle-model": "Corolla",
            "vehicle-year": 2018,
            "license-plate": "ABC-1234",
        });

        // Act
        let response = send(
            sut(service_request),
            post("application/json", body.to_string()),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"success": true, "message": "Message sent successfully!"})
        );
    }

    #[tokio::test]
    async fn submit_numeric_year_out_of_range() {
        // Arrange
        let form = ServiceRequestForm {
            vehicle_year: Some("1899".into()),
            ..ServiceRequestForm::default()
        };
        let errors = [(FormField::VehicleYear, FieldError::Invalid)]
            .into_iter()
            .collect::<FieldErrors>();
        let service_request = MockServiceRequestFeatureService::new()
            .with_submit(form, Err(ServiceRequestSubmitError::Invalid(errors)));

        // Act
        let response = send(
            sut(service_request),
            post("application/json", r#"{"vehicle-year": 1899}"#),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({
                "success": false,
                "message": "Invalid vehicle year.",
                "errors": {"vehicle-year": "Invalid vehicle year."},
            })
        );
    }

    #[tokio::test]
    async fn submit_malformed_body() {
        for (content_type, body) in [
            ("application/json", "{not json"),
            ("application/json", "null"),
            ("application/json", r#"{"name": ["Jo"]}"#),
            ("text/plain", "name=Jo"),
        ] {
            // Arrange
            let sut = sut(MockServiceRequestFeatureService::new());

            // Act
            let response = send(sut, post(content_type, body)).await;

            // Assert
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(
                json_body(response).await,
                json!({"success": false, "message": "Invalid request."})
            );
        }
    }

    struct PanickingServiceRequest;

    impl ServiceRequestFeatureService for PanickingServiceRequest {
        async fn submit(&self, _form: ServiceRequestForm) -> Result<(), ServiceRequestSubmitError> {
            panic!("handler exploded")
        }

        fn form_rules(&self) -> FormRules {
            FormRules::new(2026)
        }
    }

    #[tokio::test]
    async fn panic_becomes_json_outcome() {
        // Arrange
        let sut = RestServer {
            health: MockHealthFeatureService::new(),
            service_request: PanickingServiceRequest,
        };

        // Act
        let response = send(sut, post("application/json", "{}")).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({
                "success": false,
                "message": "Failed to send message. Please try again later.",
            })
        );
    }

    #[tokio::test]
    async fn form_rules() {
        // Arrange
        let rules = FormRules::new(2026);
        let service_request = MockServiceRequestFeatureService::new().with_form_rules(rules.clone());

        // Act
        let response = send(sut(service_request), get("/form-rules")).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::to_value(rules).unwrap());
    }

    #[tokio::test]
    async fn health() {
        for (email, status) in [
            (true, StatusCode::OK),
            (false, StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            // Arrange
            let sut = RestServer {
                health: MockHealthFeatureService::new().with_get_status(HealthStatus { email }),
                service_request: MockServiceRequestFeatureService::new(),
            };

            // Act
            let response = send(sut, get("/health")).await;

            // Assert
            assert_eq!(response.status(), status);
            assert_eq!(
                json_body(response).await,
                json!({"http": true, "email": email})
            );
        }
    }

    #[tokio::test]
    async fn landing_page() {
        // Act
        let response = send(sut(MockServiceRequestFeatureService::new()), get("/")).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes, autocare_assets::index().content);
    }

    #[tokio::test]
    async fn static_assets() {
        for asset in ASSETS {
            let response = send(sut(MockServiceRequestFeatureService::new()), get(asset.path)).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", asset.path);
            assert_eq!(response.headers()[header::CONTENT_TYPE], asset.content_type);
        }

        let response = send(
            sut(MockServiceRequestFeatureService::new()),
            get("/js/missing.js"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn landing_page_offers_every_service_type() {
        let html = std::str::from_utf8(autocare_assets::index().content).unwrap();

        for service_type in ServiceType::ALL {
            let option = format!(
                r#"<option value="{}">{}</option>"#,
                service_type.as_str(),
                service_type.label()
            );
            assert!(html.contains(&option), "{option}");
        }

        // one placeholder option
        assert_eq!(
            html.matches("<option value=").count(),
            ServiceType::ALL.len() + 1
        );
    }
}
