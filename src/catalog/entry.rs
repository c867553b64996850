use serde::Serialize;

/// Everything needed to find one element of a scanned page again
///
/// Entries are snapshots: they are only created by a scan and cannot be changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    link: String,

    tag_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    name_attribute: Option<String>,

    object_name: String,

    class_names: Vec<String>,

    css_selector: String,

    #[serde(rename = "xPath")]
    xpath: String,
}

/// Field values collected while visiting an element
#[derive(Debug, Default)]
pub(crate) struct EntryFields {
    pub id: Option<String>,
    pub link: String,
    pub tag_name: String,
    pub name_attribute: Option<String>,
    pub object_name: String,
    pub class_names: Vec<String>,
    pub css_selector: String,
    pub xpath: String,
}

impl PageEntry {
    pub(crate) fn from_fields(fields: EntryFields) -> Self {
        Self {
            id: fields.id,
            link: fields.link,
            tag_name: fields.tag_name,
            name_attribute: fields.name_attribute,
            object_name: fields.object_name,
            class_names: fields.class_names,
            css_selector: fields.css_selector,
            xpath: fields.xpath,
        }
    }

    /// The element's `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The element's `href`, empty when it has none
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Lower-cased tag name
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The element's `name` attribute
    pub fn name_attribute(&self) -> Option<&str> {
        self.name_attribute.as_deref()
    }

    /// Derived label; not unique
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Class tokens in source order
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Class selector such as `.btn.btn-primary`, empty without classes
    pub fn css_selector(&self) -> &str {
        &self.css_selector
    }

    /// Absolute index-qualified path, unique within its scan
    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    /// Check if entry is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Check if the element had a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_names.iter().any(|c| c == class_name)
    }

    /// Best locator to hand to an automation tool: the class selector when it
    /// has one, the XPath otherwise
    pub fn best_locator(&self) -> &str {
        if self.css_selector.is_empty() {
            &self.xpath
        } else {
            &self.css_selector
        }
    }

    /// One-line summary, used in trace logs and `page-catalog --list`
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name)];

        if let Some(id) = &self.id {
            parts.push(format!(" id=\"{}\"", id));
        }

        if !self.class_names.is_empty() {
            parts.push(format!(" class=\"{}\"", self.class_names.join(" ")));
        }

        if !self.link.is_empty() {
            parts.push(format!(" href=\"{}\"", self.link));
        }

        parts.push(format!("> {}", self.xpath));
        parts.join("")
    }
}
