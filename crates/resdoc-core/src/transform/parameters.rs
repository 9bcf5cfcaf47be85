use crate::design::{Location, ParameterRecord};
use crate::parse::header::HeaderOrRef;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::response::Response;
use crate::parse::security::ApiKeyLocation;
use crate::parse::spec::OpenApiSpec;

/// Project declared parameters at `location` into records, in declaration order.
pub fn declared_parameters(params: &[&Parameter], location: Location) -> Vec<ParameterRecord> {
    params
        .iter()
        .filter(|p| record_location(p.location) == Some(location))
        .map(|p| {
            ParameterRecord::new(
                "",
                p.name.as_str(),
                location,
                p.schema.as_ref().map(|s| s.type_label()).unwrap_or_default(),
                p.required,
                p.description.as_deref().unwrap_or_default(),
            )
        })
        .collect()
}

/// Map a parameter's `in` onto a record location. Cookies have none.
fn record_location(location: ParameterLocation) -> Option<Location> {
    match location {
        ParameterLocation::Header => Some(Location::Header),
        ParameterLocation::Query => Some(Location::Query),
        ParameterLocation::Path => Some(Location::Path),
        ParameterLocation::Cookie => None,
    }
}

/// One required record per security scheme carried in a header or query
/// parameter. Schemes without such a location (http, oauth2, cookie keys)
/// contribute nothing.
pub fn security_parameters(spec: &OpenApiSpec) -> Vec<ParameterRecord> {
    spec.security_schemes()
        .filter_map(|(key, scheme)| {
            let location = match scheme.location? {
                ApiKeyLocation::Header => Location::Header,
                ApiKeyLocation::Query => Location::Query,
                ApiKeyLocation::Cookie => return None,
            };
            Some(ParameterRecord::new(
                "",
                scheme.name.as_deref().unwrap_or(key.as_str()),
                location,
                scheme.scheme_type.as_str(),
                true,
                scheme.description.as_deref().unwrap_or_default(),
            ))
        })
        .collect()
}

/// Headers declared on a response.
pub fn response_headers(response: &Response) -> Vec<ParameterRecord> {
    response
        .headers
        .iter()
        .filter_map(|(name, header)| match header {
            HeaderOrRef::Header(h) => Some(ParameterRecord::new(
                "",
                name.as_str(),
                Location::Header,
                h.schema.as_ref().map(|s| s.type_label()).unwrap_or_default(),
                h.required,
                h.description.as_deref().unwrap_or_default(),
            )),
            HeaderOrRef::Ref { ref_path } => {
                log::debug!("skipping unresolved response header {name} ({ref_path})");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn params(yaml: &str) -> Vec<Parameter> {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_declared_parameters_filter_by_location() {
        let declared = params(
            r#"
- name: petId
  in: path
  required: true
  schema: { type: Integer }
- name: limit
  in: Query
  description: page size
  schema: { type: integer }
- name: X-Request-Id
  in: header
  schema: { type: string }
- name: session
  in: cookie
  schema: { type: string }
"#,
        );
        let refs: Vec<&Parameter> = declared.iter().collect();

        let path = declared_parameters(&refs, Location::Path);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].name, "petId");
        assert_eq!(path[0].data_type, "integer");
        assert!(path[0].required);

        let query = declared_parameters(&refs, Location::Query);
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].location, Location::Query);
        assert_eq!(query[0].description, "page size");
        assert!(!query[0].required);

        let header = declared_parameters(&refs, Location::Header);
        assert_eq!(header.len(), 1);
        assert_eq!(header[0].parent, "");
    }

    #[test]
    fn test_parameter_without_schema_has_empty_type() {
        let declared = params("- name: q\n  in: query\n");
        let refs: Vec<&Parameter> = declared.iter().collect();
        assert_eq!(declared_parameters(&refs, Location::Query)[0].data_type, "");
    }

    #[test]
    fn test_security_parameters_by_location() {
        let spec = parse::from_yaml(
            r#"
openapi: 3.0.3
info: { title: Keys, version: "1" }
paths: {}
components:
  securitySchemes:
    apiKeyHeader:
      type: apiKey
      name: X-API-Key
      in: header
      description: tenant key
    apiKeyQuery:
      type: apiKey
      name: api_key
      in: query
    cookieKey:
      type: apiKey
      name: sid
      in: cookie
    bearer:
      type: http
      scheme: bearer
"#,
        )
        .unwrap();
        let records = security_parameters(&spec);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "X-API-Key");
        assert_eq!(records[0].location, Location::Header);
        assert_eq!(records[0].data_type, "apiKey");
        assert_eq!(records[0].description, "tenant key");
        assert_eq!(records[1].name, "api_key");
        assert_eq!(records[1].location, Location::Query);
        assert!(records.iter().all(|r| r.required));
    }

    #[test]
    fn test_security_location_any_case() {
        let spec = parse::from_yaml(
            r#"
openapi: 3.0.3
info: { title: Keys, version: "1" }
paths:
  /things:
    get:
      responses: {}
components:
  securitySchemes:
    key:
      type: apiKey
      name: X-Key
      in: Header
    token:
      type: apiKey
      in: QUERY
"#,
        )
        .unwrap();
        let records = security_parameters(&spec);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "X-Key");
        assert_eq!(records[0].location, Location::Header);
        assert_eq!(records[1].name, "token");
        assert_eq!(records[1].location, Location::Query);
    }

    #[test]
    fn test_response_headers() {
        let response: Response = serde_yaml_ng::from_str(
            r#"
description: ok
headers:
  X-Rate-Limit:
    description: calls per hour
    required: true
    schema: { type: integer }
  ETag:
    schema: { type: string }
"#,
        )
        .unwrap();
        let records = response_headers(&response);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "X-Rate-Limit");
        assert_eq!(records[0].data_type, "integer");
        assert!(records[0].required);
        assert_eq!(records[1].name, "ETag");
        assert!(!records[1].required);
        assert!(records.iter().all(|r| r.location == Location::Header));
    }
}
