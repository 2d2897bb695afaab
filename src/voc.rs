//! Pascal VOC annotation reading.
//!
//! Only the parts of the format the converter needs are read: the image
//! `<size>` and every top-level `<object>` with its `<name>` and `<bndbox>`.
//! A broken `<bndbox>` is kept on the object instead of failing the document,
//! since objects of unknown classes are dropped without reading their box.

use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConvertError, FieldError};
use crate::types::{BoundingBox, VocAnnotation, VocObject};

/// Read and parse a VOC XML file from disk.
pub fn read_voc_file(path: &Path) -> Result<VocAnnotation, ConvertError> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_voc(&content)
}

/// Parse the text of a VOC XML document.
pub fn parse_voc(content: &str) -> Result<VocAnnotation, ConvertError> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();

    let size = child(root, "size").ok_or(FieldError::MissingElement("size"))?;
    let width: u32 = child_value(size, "width")?;
    let height: u32 = child_value(size, "height")?;
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidImageSize { width, height });
    }

    let objects = root
        .children()
        .filter(|n| n.has_tag_name("object"))
        .map(parse_object)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VocAnnotation {
        width,
        height,
        objects,
    })
}

fn parse_object(node: Node) -> Result<VocObject, ConvertError> {
    let name = child(node, "name")
        .ok_or(FieldError::MissingElement("name"))?
        .text()
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(VocObject {
        name,
        bndbox: parse_bndbox(node),
    })
}

fn parse_bndbox(node: Node) -> Result<BoundingBox, FieldError> {
    let bnd = child(node, "bndbox").ok_or(FieldError::MissingElement("bndbox"))?;
    Ok(BoundingBox {
        xmin: child_value(bnd, "xmin")?,
        xmax: child_value(bnd, "xmax")?,
        ymin: child_value(bnd, "ymin")?,
        ymax: child_value(bnd, "ymax")?,
    })
}

// First direct child element with the given tag
fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn child_value<T: FromStr>(node: Node, tag: &'static str) -> Result<T, FieldError> {
    let text = child(node, tag)
        .ok_or(FieldError::MissingElement(tag))?
        .text()
        .unwrap_or_default()
        .trim();
    text.parse().map_err(|_| FieldError::InvalidNumber {
        field: tag,
        value: text.to_string(),
    })
}
