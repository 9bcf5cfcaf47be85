use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use super::components::Components;
use super::example::ExampleOrRef;
use super::header::HeaderOrRef;
use super::media_type::MediaType;
use super::operation::{HttpMethod, Operation, PathItem};
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Expands local `#/components/...` pointers into a self-contained copy of
/// the document. Recursive schema pointers are the only references left in
/// the copy.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
    /// Pointers currently being expanded, outermost first.
    in_progress: HashSet<String>,
    /// Schema pointers whose expansion cut no cycle, so it is the same
    /// wherever the pointer appears.
    expanded: HashMap<String, SchemaOrRef>,
    /// Recursive pointers kept so far.
    cycle_cuts: usize,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
            in_progress: HashSet::new(),
            expanded: HashMap::new(),
            cycle_cuts: 0,
        }
    }

    /// Expand every path item of the document.
    pub fn resolve_spec(&mut self, spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
        let mut resolved = spec.clone();
        for (path, item) in resolved.paths.iter_mut() {
            log::trace!("resolving references under {path}");
            self.resolve_path_item(item)?;
        }
        Ok(resolved)
    }

    /// Expand a schema. A pointer already being expanded further up is
    /// kept as is. Expansions of non-recursive pointers are reused.
    pub fn resolve_schema_or_ref(
        &mut self,
        schema_or_ref: &SchemaOrRef,
    ) -> Result<SchemaOrRef, ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } if self.in_progress.contains(ref_path) => {
                log::debug!("recursive schema {ref_path} kept as a reference");
                self.cycle_cuts += 1;
                Ok(schema_or_ref.clone())
            }
            SchemaOrRef::Ref { ref_path } => {
                if let Some(cached) = self.expanded.get(ref_path) {
                    return Ok(cached.clone());
                }
                let target = self.target(ref_path, "schemas", |c| &c.schemas)?;
                let cuts_before = self.cycle_cuts;
                self.in_progress.insert(ref_path.clone());
                let expanded = self.resolve_schema_or_ref(target);
                self.in_progress.remove(ref_path);
                let expanded = expanded?;
                if self.cycle_cuts == cuts_before {
                    self.expanded.insert(ref_path.clone(), expanded.clone());
                }
                Ok(expanded)
            }
            SchemaOrRef::Schema(schema) => Ok(SchemaOrRef::Schema(Box::new(
                self.resolve_schema(schema)?,
            ))),
        }
    }

    fn resolve_path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;
        for method in HttpMethod::ALL {
            if let Some(op) = item.operation_mut(method) {
                self.resolve_operation(op)?;
            }
        }
        for op in item.additional_operations.values_mut() {
            self.resolve_operation(op)?;
        }
        Ok(())
    }

    fn resolve_operation(&mut self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters)?;
        if let Some(body) = op.request_body.take() {
            op.request_body = Some(self.resolve_request_body_or_ref(&body)?);
        }
        for response in op.responses.values_mut() {
            *response = self.resolve_response_or_ref(response)?;
        }
        Ok(())
    }

    fn resolve_schema(&mut self, schema: &Schema) -> Result<Schema, ResolveError> {
        let mut resolved = schema.clone();
        for prop in resolved.properties.values_mut() {
            *prop = self.resolve_schema_or_ref(prop)?;
        }
        if let Some(items) = resolved.items.as_mut() {
            **items = self.resolve_schema_or_ref(items)?;
        }
        Ok(resolved)
    }

    fn resolve_parameters(
        &mut self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| self.resolve_parameter_or_ref(p))
            .collect()
    }

    fn resolve_parameter_or_ref(
        &mut self,
        param: &ParameterOrRef,
    ) -> Result<ParameterOrRef, ResolveError> {
        match param {
            ParameterOrRef::Ref { ref_path } => {
                let target = self.target(ref_path, "parameters", |c| &c.parameters)?;
                self.follow(ref_path, |r| r.resolve_parameter_or_ref(target))
            }
            ParameterOrRef::Parameter(p) => {
                let mut resolved = p.clone();
                resolved.schema = self.resolve_optional_schema(p.schema.as_ref())?;
                Ok(ParameterOrRef::Parameter(resolved))
            }
        }
    }

    fn resolve_request_body_or_ref(
        &mut self,
        body: &RequestBodyOrRef,
    ) -> Result<RequestBodyOrRef, ResolveError> {
        match body {
            RequestBodyOrRef::Ref { ref_path } => {
                let target = self.target(ref_path, "requestBodies", |c| &c.request_bodies)?;
                self.follow(ref_path, |r| r.resolve_request_body_or_ref(target))
            }
            RequestBodyOrRef::RequestBody(rb) => {
                let mut resolved = rb.clone();
                resolved.content = self.resolve_content(&rb.content)?;
                Ok(RequestBodyOrRef::RequestBody(resolved))
            }
        }
    }

    fn resolve_response_or_ref(
        &mut self,
        response: &ResponseOrRef,
    ) -> Result<ResponseOrRef, ResolveError> {
        match response {
            ResponseOrRef::Ref { ref_path } => {
                let target = self.target(ref_path, "responses", |c| &c.responses)?;
                self.follow(ref_path, |r| r.resolve_response_or_ref(target))
            }
            ResponseOrRef::Response(resp) => {
                let mut resolved = resp.clone();
                resolved.content = self.resolve_content(&resp.content)?;
                for header in resolved.headers.values_mut() {
                    *header = self.resolve_header_or_ref(header)?;
                }
                Ok(ResponseOrRef::Response(resolved))
            }
        }
    }

    fn resolve_header_or_ref(&mut self, header: &HeaderOrRef) -> Result<HeaderOrRef, ResolveError> {
        match header {
            HeaderOrRef::Ref { ref_path } => {
                let target = self.target(ref_path, "headers", |c| &c.headers)?;
                self.follow(ref_path, |r| r.resolve_header_or_ref(target))
            }
            HeaderOrRef::Header(h) => {
                let mut resolved = h.clone();
                resolved.schema = self.resolve_optional_schema(h.schema.as_ref())?;
                Ok(HeaderOrRef::Header(resolved))
            }
        }
    }

    fn resolve_example_or_ref(
        &mut self,
        example: &ExampleOrRef,
    ) -> Result<ExampleOrRef, ResolveError> {
        match example {
            ExampleOrRef::Ref { ref_path } => {
                let target = self.target(ref_path, "examples", |c| &c.examples)?;
                self.follow(ref_path, |r| r.resolve_example_or_ref(target))
            }
            ExampleOrRef::Example(_) => Ok(example.clone()),
        }
    }

    fn resolve_content(
        &mut self,
        content: &IndexMap<String, MediaType>,
    ) -> Result<IndexMap<String, MediaType>, ResolveError> {
        let mut resolved = content.clone();
        for mt in resolved.values_mut() {
            mt.schema = self.resolve_optional_schema(mt.schema.as_ref())?;
            for example in mt.examples.values_mut() {
                *example = self.resolve_example_or_ref(example)?;
            }
        }
        Ok(resolved)
    }

    fn resolve_optional_schema(
        &mut self,
        schema: Option<&SchemaOrRef>,
    ) -> Result<Option<SchemaOrRef>, ResolveError> {
        schema.map(|s| self.resolve_schema_or_ref(s)).transpose()
    }

    /// Look up the component a pointer names within `section`.
    fn target<T>(
        &self,
        ref_path: &str,
        section: &str,
        pick: impl FnOnce(&'a Components) -> &'a IndexMap<String, T>,
    ) -> Result<&'a T, ResolveError> {
        let name = parse_ref_name(ref_path, section)?;
        self.components
            .and_then(|c| pick(c).get(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    /// Expand a non-schema pointer. Such pointers may not loop back on
    /// themselves.
    fn follow<T>(
        &mut self,
        ref_path: &str,
        expand: impl FnOnce(&mut Self) -> Result<T, ResolveError>,
    ) -> Result<T, ResolveError> {
        if !self.in_progress.insert(ref_path.to_string()) {
            return Err(ResolveError::CircularRef(ref_path.to_string()));
        }
        let expanded = expand(self);
        self.in_progress.remove(ref_path);
        expanded
    }
}

/// Split `#/components/<section>/<name>` and return `<name>`.
fn parse_ref_name<'r>(ref_path: &'r str, section: &str) -> Result<&'r str, ResolveError> {
    let invalid = || ResolveError::InvalidRefFormat(ref_path.to_string());
    let (found, name) = ref_path
        .strip_prefix("#/components/")
        .and_then(|rest| rest.split_once('/'))
        .ok_or_else(invalid)?;
    if found != section || name.is_empty() {
        return Err(invalid());
    }
    Ok(name)
}
