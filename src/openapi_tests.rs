#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr};
    use utoipa::OpenApi;

    fn method_name(method: &PathItemType) -> &'static str {
        match method {
            PathItemType::Get => "GET",
            PathItemType::Post => "POST",
            PathItemType::Put => "PUT",
            PathItemType::Delete => "DELETE",
            PathItemType::Options => "OPTIONS",
            PathItemType::Head => "HEAD",
            PathItemType::Patch => "PATCH",
            PathItemType::Trace => "TRACE",
            PathItemType::Connect => "CONNECT",
        }
    }

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components should be generated");
        match components.schemas.get(name) {
            Some(RefOr::T(utoipa::openapi::schema::Schema::Object(obj))) => {
                obj.properties.keys().cloned().collect()
            }
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "AI Supply Chain Management Platform");

        let components = openapi.components.as_ref().unwrap();
        for schema in [
            "ErrorResponse",
            "HealthResponse",
            "ForecastRequest",
            "InventoryItem",
            "Shipment",
            "ScenarioRequest",
            "GenerateReportRequest",
        ] {
            assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field), "ErrorResponse lacks {}", field);
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "database"] {
            assert!(properties.iter().any(|p| p == field), "HealthResponse lacks {}", field);
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();
        let health_get = openapi
            .paths
            .paths
            .get("/health")
            .and_then(|path| path.operations.get(&PathItemType::Get))
            .expect("/health should be documented");

        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));
    }

    #[test]
    fn test_api_paths_are_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;
        let expected = [
            ("/api/demand/forecast", PathItemType::Post),
            ("/api/demand/forecast/{forecast_id}", PathItemType::Get),
            ("/api/demand/festival-calendar", PathItemType::Get),
            ("/api/inventory/", PathItemType::Get),
            ("/api/inventory/{item_id}", PathItemType::Delete),
            ("/api/logistics/shipments/{shipment_id}", PathItemType::Get),
            ("/api/logistics/shipments/{shipment_id}/status", PathItemType::Put),
            ("/api/logistics/routes/optimize", PathItemType::Post),
            ("/api/logistics/weather", PathItemType::Get),
            ("/api/scenarios/compare", PathItemType::Post),
            ("/api/reports/generate-pdf", PathItemType::Post),
        ];
        for (path, method) in expected {
            let item = paths.get(path).unwrap_or_else(|| panic!("{} should be documented", path));
            assert!(
                item.operations.contains_key(&method),
                "{} lacks {}",
                path,
                method_name(&method)
            );
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }

    #[test]
    fn test_handler_error_bodies_use_error_response() {
        let openapi = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for (path, method, status) in [
            ("/api/reports/generate-pdf", "post", "400"),
            ("/api/scenarios/compare", "post", "400"),
            ("/api/inventory/{item_id}", "delete", "404"),
            ("/api/logistics/shipments/{shipment_id}", "get", "404"),
        ] {
            let response = &openapi["paths"][path][method]["responses"][status];
            let schema = &response["content"]["application/json"]["schema"];
            assert_eq!(
                schema["$ref"], "#/components/schemas/ErrorResponse",
                "{} {} {}", method, path, status
            );
        }
    }
}
