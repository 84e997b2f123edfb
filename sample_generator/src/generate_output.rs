use crate::config::GeneratorConfig;
use crate::element_generator::ElementGenerator;
use crate::error::Result;
use crate::generate::ValueGenerator;
use crate::schema_graph::SchemaGraph;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Streaming XML writer the element generator emits into
pub struct OutputSink<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> OutputSink<W> {
    pub fn new(inner: W, indent: usize) -> Self {
        let writer = match indent {
            0 => Writer::new(inner),
            width => Writer::new_with_indent(inner, b' ', width),
        };

        OutputSink { writer }
    }

    pub fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    fn open_tag<'a>(name: &'a str, namespace: Option<&'a str>) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        if let Some(namespace) = namespace {
            start.push_attribute(("xmlns", namespace));
        }
        start
    }

    pub fn start(&mut self, name: &str, namespace: Option<&str>) -> Result<()> {
        self.writer
            .write_event(Event::Start(Self::open_tag(name, namespace)))?;
        Ok(())
    }

    pub fn empty(&mut self, name: &str, namespace: Option<&str>) -> Result<()> {
        self.writer
            .write_event(Event::Empty(Self::open_tag(name, namespace)))?;
        Ok(())
    }

    pub fn text(&mut self, value: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Write the declaration and one sample element per root element of the
/// main schema.
pub(crate) fn generate_output(graph: &SchemaGraph, config: &GeneratorConfig) -> Result<String> {
    let mut sink = OutputSink::new(Vec::new(), config.indent);
    sink.declaration()?;

    let mut values = ValueGenerator::new(config);
    let mut generator = ElementGenerator::new(graph, &mut values);
    for element in graph.root_elements() {
        generator.generate_root(element, graph.target_namespace(), &mut sink)?;
    }

    let output = String::from_utf8(sink.into_inner())?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(indent: usize, write: impl FnOnce(&mut OutputSink<Vec<u8>>) -> Result<()>) -> String {
        let mut sink = OutputSink::new(Vec::new(), indent);
        write(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_namespace_only_where_asked() {
        let output = render(0, |sink| {
            sink.start("root", Some("urn:example"))?;
            sink.start("child", None)?;
            sink.text("value")?;
            sink.end("child")?;
            sink.end("root")
        });

        assert_eq!(
            output,
            r#"<root xmlns="urn:example"><child>value</child></root>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let output = render(0, |sink| {
            sink.start("a", None)?;
            sink.text("x < y & z")?;
            sink.end("a")
        });

        assert_eq!(output, "<a>x &lt; y &amp; z</a>");
    }

    #[test]
    fn test_indentation() {
        let output = render(2, |sink| {
            sink.declaration()?;
            sink.start("root", None)?;
            sink.start("child", None)?;
            sink.text("v")?;
            sink.end("child")?;
            sink.empty("blank", None)?;
            sink.end("root")
        });

        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>\n  <child>v</child>\n  <blank/>\n</root>"
        );
    }
}
