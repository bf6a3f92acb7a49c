//! Top-level split of an EFetch payload into per-article fragments
//!
//! Splitting on raw markup keeps a broken article from poisoning the
//! decode of its neighbours.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{PubMedError, Result};

const ARTICLE_SET_TAG: &[u8] = b"PubmedArticleSet";
const ARTICLE_TAG: &[u8] = b"PubmedArticle";
const ARTICLE_OPEN: &str = "<PubmedArticle";

/// Return the source text of every `<PubmedArticle>` child of the root
///
/// Fails if the payload is not well-formed XML, is truncated, or its root is
/// not a `<PubmedArticleSet>`.
pub(super) fn split_articles(xml: &str) -> Result<Vec<&str>> {
    let mut reader = Reader::from_str(xml);
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut article_start: Option<usize> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    check_root(e.name().as_ref())?;
                    root_seen = true;
                } else if depth == 1 && e.name().as_ref() == ARTICLE_TAG {
                    let tag_end = reader.buffer_position() as usize;
                    article_start = xml[..tag_end].rfind(ARTICLE_OPEN);
                }
                depth += 1;
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                if depth == 1 && e.name().as_ref() == ARTICLE_TAG {
                    if let Some(start) = article_start.take() {
                        let end = reader.buffer_position() as usize;
                        fragments.push(&xml[start..end]);
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    check_root(e.name().as_ref())?;
                    root_seen = true;
                } else if depth == 1 && e.name().as_ref() == ARTICLE_TAG {
                    let end = reader.buffer_position() as usize;
                    if let Some(start) = xml[..end].rfind(ARTICLE_OPEN) {
                        fragments.push(&xml[start..end]);
                    }
                }
            }
            Ok(Event::Eof) => {
                if depth > 0 {
                    return Err(PubMedError::XmlError(format!(
                        "EFetch payload ended with {} unclosed element(s)",
                        depth
                    )));
                }
                break;
            }
            Err(e) => {
                return Err(PubMedError::XmlError(format!(
                    "Malformed EFetch payload near byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !root_seen {
        return Err(PubMedError::XmlError(
            "EFetch payload has no PubmedArticleSet root element".to_string(),
        ));
    }

    Ok(fragments)
}

fn check_root(name: &[u8]) -> Result<()> {
    if name == ARTICLE_SET_TAG {
        Ok(())
    } else {
        Err(PubMedError::XmlError(format!(
            "Unexpected root element <{}>, expected <PubmedArticleSet>",
            String::from_utf8_lossy(name)
        )))
    }
}
