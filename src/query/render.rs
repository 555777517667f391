// Rendering of presence query results into the supported output formats.
//
// Three renderers, one per registered output type. Known types always
// produce a response, including a not-found response; an unrecognized type
// produces nothing at all beyond a warning. That asymmetry matches the
// behavior query clients already depend on.

use log::{error, warn};
use xml::writer::{EmitterConfig, XmlEvent};

use crate::models::{AvailabilityState, QueryResult, ResourceKey};
use crate::query::cache::{ResourceCache, ResourceLoader};

/// A rendered response body together with its content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Stateless dispatcher over the registered output types.
pub struct RendererDispatch;

impl RendererDispatch {
    /// Output type assumed when the caller does not name one.
    pub const DEFAULT_TYPE: &'static str = "image";

    /// Render a query result as `output_type`.
    ///
    /// Matching is exact and case-sensitive. An unregistered type yields
    /// `None` after one warning; no error body is produced for it.
    pub fn render<L: ResourceLoader>(
        output_type: &str,
        result: &QueryResult,
        cache: &ResourceCache<L>,
    ) -> Option<Rendered> {
        match output_type {
            "image" => Some(render_image(result, cache)),
            "xml" => Some(render_xml(result)),
            "text" => Some(render_text(result)),
            other => {
                warn!("Presence query received an invalid output type: {}", other);
                None
            }
        }
    }
}

fn render_image<L: ResourceLoader>(result: &QueryResult, cache: &ResourceCache<L>) -> Rendered {
    let key = match result {
        QueryResult::Found(presence) => ResourceKey::State(presence.state),
        // Unknown users get the same icon as offline ones.
        QueryResult::NotFound => ResourceKey::State(AvailabilityState::Unavailable),
    };
    let body = cache.get(key).map(<[u8]>::to_vec).unwrap_or_default();
    Rendered {
        body,
        content_type: "image/gif",
    }
}

fn render_xml(result: &QueryResult) -> Rendered {
    let body = write_presence_document(result).unwrap_or_else(|e| {
        error!("Failed to serialize presence document: {}", e);
        Vec::new()
    });
    Rendered {
        body,
        content_type: "text/xml",
    }
}

fn write_presence_document(result: &QueryResult) -> xml::writer::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut writer = EmitterConfig::new()
        .write_document_declaration(false)
        .create_writer(&mut out);

    match result {
        QueryResult::Found(presence) => {
            writer.write(
                XmlEvent::start_element("presence")
                    .attr("jid", &presence.from)
                    .attr("state", presence.state.as_str()),
            )?;
            if let Some(text) = &presence.status_text {
                writer.write(XmlEvent::start_element("status"))?;
                writer.write(XmlEvent::characters(text))?;
                writer.write(XmlEvent::end_element())?;
            }
            writer.write(XmlEvent::end_element())?;
        }
        QueryResult::NotFound => {
            writer.write(XmlEvent::start_element("presence").attr("type", "error"))?;
            writer.write(XmlEvent::start_element("error").attr("code", "404"))?;
            writer.write(XmlEvent::characters("Not Found"))?;
            writer.write(XmlEvent::end_element())?;
            writer.write(XmlEvent::end_element())?;
        }
    }
    Ok(out)
}

fn render_text(result: &QueryResult) -> Rendered {
    let line = match result {
        QueryResult::Found(presence) => match &presence.status_text {
            Some(text) => format!("{} ({})", state_label(presence.state), text),
            None => state_label(presence.state).to_string(),
        },
        QueryResult::NotFound => "Unavailable".to_string(),
    };
    Rendered {
        body: line.into_bytes(),
        content_type: "text/plain",
    }
}

fn state_label(state: AvailabilityState) -> &'static str {
    match state {
        AvailabilityState::Available => "Available",
        AvailabilityState::Away => "Away",
        AvailabilityState::DoNotDisturb => "Do Not Disturb",
        AvailabilityState::ExtendedAway => "Extended Away",
        AvailabilityState::Unavailable => "Unavailable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NormalizedPresence;
    use anyhow::Result;

    struct StubLoader;

    impl ResourceLoader for StubLoader {
        fn load(&self, path: &str) -> Result<Vec<u8>> {
            Ok(path.as_bytes().to_vec())
        }
    }

    fn found(state: AvailabilityState, text: Option<&str>) -> QueryResult {
        QueryResult::Found(NormalizedPresence {
            from: "user@example.org".to_string(),
            to: "asker@example.org".to_string(),
            state,
            status_text: text.map(str::to_string),
        })
    }

    #[test]
    fn test_unknown_type_produces_nothing() {
        let cache = ResourceCache::new(StubLoader);
        let result = found(AvailabilityState::Available, None);
        assert!(RendererDispatch::render("json", &result, &cache).is_none());
        // Case-sensitive: "Image" is not "image".
        assert!(RendererDispatch::render("Image", &result, &cache).is_none());
    }

    #[test]
    fn test_image_renderer_uses_cached_state_icon() {
        let cache = ResourceCache::new(StubLoader);
        let rendered =
            RendererDispatch::render("image", &found(AvailabilityState::Available, None), &cache)
                .unwrap();
        assert_eq!(rendered.content_type, "image/gif");
        assert_eq!(rendered.body, b"user-green-16x16.gif".to_vec());
    }

    #[test]
    fn test_image_renderer_not_found_uses_offline_icon() {
        let cache = ResourceCache::new(StubLoader);
        let rendered =
            RendererDispatch::render("image", &QueryResult::NotFound, &cache).unwrap();
        assert_eq!(rendered.body, b"user-clear-16x16.gif".to_vec());
    }

    #[test]
    fn test_text_renderer_includes_status_text() {
        let cache = ResourceCache::new(StubLoader);
        let rendered = RendererDispatch::render(
            "text",
            &found(AvailabilityState::ExtendedAway, Some("on vacation")),
            &cache,
        )
        .unwrap();
        assert_eq!(rendered.content_type, "text/plain");
        assert_eq!(rendered.body, b"Extended Away (on vacation)".to_vec());
    }

    #[test]
    fn test_xml_not_found_is_distinct_from_found() {
        let cache = ResourceCache::new(StubLoader);
        let found_doc =
            RendererDispatch::render("xml", &found(AvailabilityState::Away, None), &cache)
                .unwrap();
        let missing_doc =
            RendererDispatch::render("xml", &QueryResult::NotFound, &cache).unwrap();

        assert_eq!(found_doc.content_type, "text/xml");
        assert!(!missing_doc.body.is_empty());
        assert_ne!(found_doc.body, missing_doc.body);
    }
}
