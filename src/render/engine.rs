//! Template compilation and per-record rendering.

use crate::{error::NetfigError, table::Record};
use std::{collections::BTreeMap, error::Error as _, fs, path::Path};
use tera::{Context, Tera};

const NAME: &str = "row";

/// A template compiled once and rendered against many records.
pub struct Engine {
    tera: Tera,
}

impl Engine {
    pub fn from_file(path: &Path) -> Result<Self, NetfigError> {
        let src = fs::read_to_string(path).map_err(NetfigError::io("read template", path))?;
        Self::from_source(&src)
    }

    pub fn from_source(src: &str) -> Result<Self, NetfigError> {
        let mut tera = Tera::default();
        // Output is config text, never HTML.
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(NAME, src)
            .map_err(|e| NetfigError::TemplateRender(flatten(&e)))?;
        Ok(Self { tera })
    }

    /// Render one record.
    ///
    /// Every column is a top-level variable. The whole row is also exposed
    /// as `record`, for headers that are not valid identifiers
    /// (`{{ record["mgmt ip"] }}`); a column literally named `record` wins.
    pub fn render(&self, record: &Record) -> Result<String, NetfigError> {
        let mut ctx = Context::new();

        let row: BTreeMap<&str, &str> = record
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        ctx.insert("record", &row);

        for (k, v) in &record.fields {
            ctx.insert(k.as_str(), v);
        }

        self.tera
            .render(NAME, &ctx)
            .map_err(|e| NetfigError::TemplateRender(flatten(&e)))
    }
}

/// Tera keeps the useful message in the source chain; join it into one line.
fn flatten(err: &tera::Error) -> String {
    let mut msg = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        msg.push_str(": ");
        msg.push_str(&c.to_string());
        cause = c.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        Record {
            row: 1,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn substitutes_columns() {
        let e = Engine::from_source("interface vlan {{vlan}}").unwrap();
        let out = e.render(&rec(&[("name", "r1"), ("vlan", "10")])).unwrap();
        assert_eq!(out, "interface vlan 10");
    }

    #[test]
    fn undefined_variable_is_render_error() {
        let e = Engine::from_source("ip {{ mgmt_ip }}").unwrap();
        let err = e.render(&rec(&[("name", "r1")])).unwrap_err();
        match err {
            NetfigError::TemplateRender(msg) => assert!(msg.contains("mgmt_ip"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn syntax_error_fails_compile() {
        assert!(matches!(
            Engine::from_source("{% if name %}unterminated"),
            Err(NetfigError::TemplateRender(_))
        ));
    }

    #[test]
    fn no_html_escaping() {
        let e = Engine::from_source("{{ desc }}").unwrap();
        let out = e.render(&rec(&[("name", "r1"), ("desc", "a<b & \"c\"")])).unwrap();
        assert_eq!(out, "a<b & \"c\"");
    }

    #[test]
    fn odd_headers_reachable_through_record() {
        let e = Engine::from_source("{{ record[\"mgmt ip\"] }}").unwrap();
        let out = e.render(&rec(&[("name", "r1"), ("mgmt ip", "10.0.0.1")])).unwrap();
        assert_eq!(out, "10.0.0.1");
    }

    #[test]
    fn control_flow_works() {
        let e = Engine::from_source("{% if vlan %}vlan {{ vlan }}{% else %}no vlan{% endif %}")
            .unwrap();
        assert_eq!(e.render(&rec(&[("name", "a"), ("vlan", "")])).unwrap(), "no vlan");
        assert_eq!(e.render(&rec(&[("name", "b"), ("vlan", "7")])).unwrap(), "vlan 7");
    }
}
