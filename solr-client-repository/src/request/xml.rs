//! XML update message bodies.

use quick_xml::escape::escape;
use solr_client_shared::{Document, FieldValue};

pub const COMMIT: &str = "<commit/>";
pub const OPTIMIZE: &str = "<optimize/>";
pub const ROLLBACK: &str = "<rollback/>";

/// `<add>` message with one `<doc>` per document.
///
/// Multi-valued fields become repeated `<field>` elements; missing fields
/// are skipped.
pub fn add_documents(documents: &[Document]) -> String {
    let mut xml = String::from("<add>");
    for document in documents {
        xml.push_str("<doc>");
        for (name, value) in document.iter() {
            let values: Vec<&str> = match value {
                FieldValue::Missing => continue,
                FieldValue::Single(v) => vec![v.as_str()],
                FieldValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
            };
            for v in values {
                xml.push_str(&format!(
                    "<field name=\"{}\">{}</field>",
                    escape(name),
                    escape(v)
                ));
            }
        }
        xml.push_str("</doc>");
    }
    xml.push_str("</add>");
    xml
}

/// `<delete>` message by unique key and/or query.
pub fn delete(unique_keys: &[String], queries: &[String]) -> String {
    let mut xml = String::from("<delete>");
    for key in unique_keys {
        xml.push_str(&format!("<id>{}</id>", escape(key.as_str())));
    }
    for query in queries {
        xml.push_str(&format!("<query>{}</query>", escape(query.as_str())));
    }
    xml.push_str("</delete>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_documents_xml() {
        let doc = Document::new()
            .with_field("id", "978-0641723445")
            .with_field("cat", FieldValue::multi(["book", "hardcover"]))
            .with_field("title", "Tom & Jerry <3");

        assert_eq!(
            add_documents(&[doc]),
            "<add><doc>\
             <field name=\"id\">978-0641723445</field>\
             <field name=\"cat\">book</field>\
             <field name=\"cat\">hardcover</field>\
             <field name=\"title\">Tom &amp; Jerry &lt;3</field>\
             </doc></add>"
        );
    }

    #[test]
    fn test_delete_xml() {
        let xml = delete(
            &["978-0641723445".to_string()],
            &["author:\"Rick\"".to_string()],
        );
        assert_eq!(
            xml,
            "<delete><id>978-0641723445</id><query>author:&quot;Rick&quot;</query></delete>"
        );
    }
}
