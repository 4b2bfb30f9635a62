//! Loading layer documents from disk.
//!
//! A document can be described in JSON or YAML (`{ name, layers: [ { kind, name, children } ] }`),
//! or taken from a directory tree where folders are containers and files are leaves.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ignore::WalkBuilder;

use crate::domain::errors::DomainError;
use crate::domain::model::{Document, Node};

/// Load a document from a `.json`/`.yaml`/`.yml` file or a directory.
pub fn load_document(path: &Path) -> Result<Document> {
    if path.is_dir() {
        return document_from_dir(path);
    }

    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    let data = || {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read document at {}", path.display()))
    };

    let document: Document = match extension.as_deref() {
        Some("json") => serde_json::from_str(&data()?)
            .with_context(|| format!("invalid JSON document in {}", path.display()))?,
        Some("yaml" | "yml") => serde_yaml::from_str(&data()?)
            .with_context(|| format!("invalid YAML document in {}", path.display()))?,
        _ => return Err(DomainError::UnsupportedDocument(path.to_path_buf()).into()),
    };
    Ok(document)
}

/// Build a document from a directory tree. Siblings are ordered by file name; ignore files
/// and hidden entries are skipped the same way `git` would.
pub fn document_from_dir(root: &Path) -> Result<Document> {
    let walker = WalkBuilder::new(root)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    // Open containers from the root down; index 0 collects top-level layers.
    let mut stack: Vec<(String, Vec<Node>)> = vec![(String::new(), Vec::new())];

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let depth = entry.depth();
        if depth == 0 {
            continue;
        }

        close_containers(&mut stack, depth);

        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
        if is_dir {
            stack.push((name, Vec::new()));
        } else if let Some((_, children)) = stack.last_mut() {
            children.push(Node::leaf(name));
        }
    }

    close_containers(&mut stack, 1);
    let layers = stack.pop().map(|(_, layers)| layers).unwrap_or_default();
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(Document { name, layers })
}

/// Fold open containers into their parents until `depth` entries remain.
fn close_containers(stack: &mut Vec<(String, Vec<Node>)>, depth: usize) {
    while stack.len() > depth {
        let Some((name, children)) = stack.pop() else {
            break;
        };
        if let Some((_, parent)) = stack.last_mut() {
            parent.push(Node::container(name, children));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::app::export::qualified_names;

    #[test]
    fn loads_json_document() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("doc.json");
        fs::write(
            &path,
            r#"{ "layers": [ { "kind": "container", "name": "A", "children": [ { "kind": "leaf", "name": "x" } ] } ] }"#,
        )?;

        let document = load_document(&path)?;
        assert_eq!(qualified_names(&document), ["A/x"]);
        Ok(())
    }

    #[test]
    fn loads_yaml_document() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("doc.YML");
        fs::write(
            &path,
            "name: poster\nlayers:\n  - kind: leaf\n    name: Title\n  - kind: container\n    name: Art\n    children:\n      - kind: leaf\n        name: Sky\n",
        )?;

        let document = load_document(&path)?;
        assert_eq!(document.name.as_deref(), Some("poster"));
        assert_eq!(qualified_names(&document), ["Title", "Art/Sky"]);
        Ok(())
    }

    #[test]
    fn rejects_unknown_extension() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("doc.psd");
        fs::write(&path, "binary")?;

        let err = load_document(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::UnsupportedDocument(_))
        ));
        Ok(())
    }

    #[test]
    fn directory_tree_becomes_document() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join("artwork");
        fs::create_dir_all(root.join("B"))?;
        fs::create_dir_all(root.join("A/inner"))?;
        fs::create_dir_all(root.join("C"))?;
        fs::write(root.join("A/y"), "")?;
        fs::write(root.join("A/x"), "")?;
        fs::write(root.join("A/inner/deep"), "")?;
        fs::write(root.join("B/z"), "")?;
        fs::write(root.join("top"), "")?;

        let document = document_from_dir(&root)?;

        assert_eq!(document.name.as_deref(), Some("artwork"));
        assert_eq!(
            qualified_names(&document),
            ["A/inner/deep", "A/x", "A/y", "B/z", "top"]
        );
        assert!(document.layers.iter().any(|node| node.name() == "C" && node.is_container()));
        Ok(())
    }
}
