use indexmap::IndexMap;

use crate::design::ExampleGroups;
use crate::parse::example::ExampleOrRef;
use crate::parse::media_type::MediaType;
use crate::parse::request_body::RequestBody;
use crate::parse::response::ResponseOrRef;

/// Request examples grouped by media type, then example name. Media types
/// without examples are left out.
pub fn request_body_examples(body: &RequestBody) -> ExampleGroups {
    let mut groups = ExampleGroups::new();
    for (media_type, mt) in &body.content {
        let mut group = IndexMap::new();
        collect_examples(mt, &mut group);
        if !group.is_empty() {
            groups.insert(media_type.clone(), group);
        }
    }
    groups
}

/// Response examples grouped by status code, then example name, across all
/// media types of that status. A later media type wins on a name clash.
pub fn response_body_examples(responses: &IndexMap<String, ResponseOrRef>) -> ExampleGroups {
    let mut groups = ExampleGroups::new();
    for (status, response) in responses {
        let Some(response) = response.as_response() else {
            continue;
        };
        let mut group = IndexMap::new();
        for mt in response.content.values() {
            collect_examples(mt, &mut group);
        }
        if !group.is_empty() {
            groups.insert(status.clone(), group);
        }
    }
    groups
}

fn collect_examples(mt: &MediaType, group: &mut IndexMap<String, String>) {
    for (name, example) in &mt.examples {
        let ExampleOrRef::Example(example) = example else {
            log::debug!("skipping unresolved example {name}");
            continue;
        };
        let Some(ref value) = example.value else {
            log::debug!("skipping example {name} without an inline value");
            continue;
        };
        match serde_json::to_string(value) {
            Ok(serialized) => {
                group.insert(name.clone(), serialized);
            }
            Err(e) => log::warn!("dropping example {name}: {e}"),
        }
    }
}
