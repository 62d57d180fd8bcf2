use roxmltree::Node;

use crate::content::{featured_image, process_content, PipelineOptions};
use crate::domain::{FeedDocument, FeedItem};
use crate::errors::{FeedError, FeedResult};
use crate::parser::xml;

const CONTENT_MODULE_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Item fields exactly as they appear in the feed, before any content stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub guid: String,
    /// `content:encoded` when present and non-empty, else `description`.
    pub raw_content: String,
    /// The `description` text, untouched.
    pub description: String,
    pub enclosure_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeed {
    pub title: String,
    pub description: String,
    pub last_build_date: String,
    pub items: Vec<RawItem>,
}

/// Read channel and item fields out of feed XML.
///
/// The only structural requirement is a `<channel>` element; missing fields
/// become empty strings.
pub fn read_feed(source: &str) -> FeedResult<RawFeed> {
    let repaired = xml::repair_entities(source);
    let doc = xml::parse(&repaired)?;

    let channel = xml::find_rss(&doc, "channel")
        .ok_or_else(|| FeedError::InvalidFeed("Missing <channel> element".to_string()))?;

    let items = doc
        .descendants()
        .filter(|node| xml::is_rss_element(*node, "item"))
        .map(read_item)
        .collect();

    Ok(RawFeed {
        title: xml::child_text(channel, "title"),
        description: xml::child_text(channel, "description"),
        last_build_date: xml::child_text(channel, "lastBuildDate"),
        items,
    })
}

fn read_item(item: Node<'_, '_>) -> RawItem {
    let description = xml::child_text(item, "description");
    let encoded = encoded_content(item);

    let raw_content = if encoded.is_empty() {
        description.clone()
    } else {
        encoded
    };

    let enclosure_url = xml::rss_child(item, "enclosure")
        .and_then(|enclosure| enclosure.attribute("url"))
        .map(str::to_string);

    RawItem {
        title: xml::child_text(item, "title"),
        link: xml::child_text(item, "link"),
        pub_date: xml::child_text(item, "pubDate"),
        guid: xml::child_text(item, "guid"),
        raw_content,
        description,
        enclosure_url,
    }
}

/// `encoded` from the content module namespace, whatever prefix binds it.
fn encoded_content(item: Node<'_, '_>) -> String {
    item.children()
        .find(|node| {
            node.is_element()
                && node.tag_name().name() == "encoded"
                && node.tag_name().namespace() == Some(CONTENT_MODULE_NS)
        })
        .map(|node| xml::text_content(node).trim().to_string())
        .unwrap_or_default()
}

impl RawItem {
    /// Run the content stages and assemble the published item.
    pub fn into_item(self, options: &PipelineOptions) -> FeedItem {
        let image = featured_image(self.enclosure_url.as_deref(), &self.raw_content);
        let processed = process_content(&self.raw_content, options);

        FeedItem::new(self.title, self.link)
            .with_pub_date(self.pub_date)
            .with_guid(self.guid)
            .with_content(processed.html)
            .with_preview(processed.preview.html, processed.preview.is_truncated)
            .with_summary(self.description)
            .with_image(image)
    }
}

impl RawFeed {
    pub fn into_document(self, options: &PipelineOptions) -> FeedDocument {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_item(options))
            .collect();

        FeedDocument::new(self.title, self.description, self.last_build_date).with_items(items)
    }
}

/// Parse feed XML into a [`FeedDocument`] with sanitized content and previews.
pub fn parse_feed(xml: &str, options: &PipelineOptions) -> FeedResult<FeedDocument> {
    let raw = read_feed(xml)?;
    tracing::debug!(items = raw.items.len(), title = %raw.title, "parsed feed");
    Ok(raw.into_document(options))
}
