use indexmap::IndexMap;

use crate::design::{
    BodyRecords, Design, Info, Location, ParameterRecord, ROOT_PARENT, Resource, ResourceContent,
    TRANSPORT_PROTOCOL,
};
use crate::error::TransformError;
use crate::parse::media_type::MediaType;
use crate::parse::operation::{HttpMethod, Operation, PathItem};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::response::find_success_response;
use crate::parse::spec::OpenApiSpec;

use super::examples::{request_body_examples, response_body_examples};
use super::flatten::Flattener;
use super::parameters::{declared_parameters, response_headers, security_parameters};

/// Options controlling how malformed input is handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Fail on malformed schema nodes and custom HTTP methods instead of
    /// skipping them.
    pub strict: bool,
}

/// Transform a parsed OpenAPI document into its flat resource design.
pub fn transform(spec: &OpenApiSpec) -> Result<Design, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<Design, TransformError> {
    // Phase 1: Resolve all $ref pointers
    let mut resolver = RefResolver::new(spec);
    let resolved = resolver.resolve_spec(spec)?;

    // Phase 2: Document-wide auth parameters, shared by every resource
    let security = security_parameters(&resolved);

    // Phase 3: One resource per path and method
    let builder = ResourceBuilder {
        flattener: Flattener::new(options.strict),
        security: &security,
        strict: options.strict,
    };
    let mut resources = Vec::new();
    for (path, item) in &resolved.paths {
        builder.collect(path, item, &mut resources)?;
    }

    let info = Info {
        title: resolved.info.title.clone(),
        version: resolved.info.version.clone(),
        description: resolved.info.description.clone().unwrap_or_default(),
    };

    log::debug!(
        "built {} resources for `{}` {}",
        resources.len(),
        info.title,
        info.version
    );
    Ok(Design { info, resources })
}

struct ResourceBuilder<'a> {
    flattener: Flattener,
    security: &'a [ParameterRecord],
    strict: bool,
}

impl ResourceBuilder<'_> {
    fn collect(
        &self,
        path: &str,
        item: &PathItem,
        out: &mut Vec<Resource>,
    ) -> Result<(), TransformError> {
        for (method, op) in item.operations() {
            out.push(self.build_resource(path, method, item, op)?);
        }

        for method in item.additional_operations.keys() {
            if self.strict {
                return Err(TransformError::UnsupportedOperation {
                    path: path.to_string(),
                    method: method.clone(),
                });
            }
            log::debug!("skipping custom method {method} {path}");
        }
        Ok(())
    }

    fn build_resource(
        &self,
        path: &str,
        method: HttpMethod,
        item: &PathItem,
        op: &Operation,
    ) -> Result<Resource, TransformError> {
        let label = format!("{} {}", method.as_str(), path);
        let resource_content = self.build_content(&label, item, op)?;
        log::debug!(
            "{label}: {} request headers, {} request bodies, {} response bodies",
            resource_content.request_header.len(),
            resource_content.request_body.len(),
            resource_content.response_body.len()
        );

        Ok(Resource {
            resource_definition: op.summary.clone().unwrap_or_default(),
            description: op.description.clone().unwrap_or_default(),
            endpoint: path.to_string(),
            transport_protocol: TRANSPORT_PROTOCOL.to_string(),
            request_verb: method.as_lower().to_string(),
            resource_content,
        })
    }

    fn build_content(
        &self,
        label: &str,
        item: &PathItem,
        op: &Operation,
    ) -> Result<ResourceContent, TransformError> {
        let params = item.effective_parameters(op);
        let mut content = ResourceContent::default();

        // Auth parameters come ahead of the declared ones
        for record in self.security {
            match record.location {
                Location::Header => content.request_header.push(record.clone()),
                Location::Query => content.request_query.push(record.clone()),
                Location::Path | Location::Body => {}
            }
        }
        content
            .request_header
            .extend(declared_parameters(&params, Location::Header));
        content
            .request_query
            .extend(declared_parameters(&params, Location::Query));
        content.request_path = declared_parameters(&params, Location::Path);

        if let Some(body) = op.request_body.as_ref().and_then(|b| b.as_request_body()) {
            let context = format!("{label} request body");
            content.request_body = self.flatten_content(&context, &body.content)?;
            content.request_body_example = request_body_examples(body);
        }

        if let Some(response) = find_success_response(&op.responses) {
            let context = format!("{label} response body");
            content.response_header = response_headers(response);
            content.response_body = self.flatten_content(&context, &response.content)?;
        }
        content.response_body_example = response_body_examples(&op.responses);

        Ok(content)
    }

    /// Flatten each media type's schema. A media type without a schema maps
    /// to an empty record list.
    fn flatten_content(
        &self,
        context: &str,
        media_types: &IndexMap<String, MediaType>,
    ) -> Result<BodyRecords, TransformError> {
        let mut bodies = BodyRecords::new();
        for (media_type, mt) in media_types {
            let records = match mt.schema {
                Some(ref schema) => {
                    let context = format!("{context} {media_type}");
                    self.flattener.flatten(schema, ROOT_PARENT, &context)?
                }
                None => Vec::new(),
            };
            bodies.insert(media_type.clone(), records);
        }
        Ok(bodies)
    }
}
