//! Resolver inlining embeds across all definitions of a language.
//!
//! Embeds behave like macro inclusions: `<:b:>` inside `a` is replaced by the
//! fully resolved segments of `b`. Resolution is a depth-first walk driven by
//! an explicit frame stack, so deep embed chains never grow the call stack.
//! The keys currently on the stack form the path used to report cycles.

use std::collections::{BTreeMap, HashMap};

use super::{
    codex::Codex,
    entry::{Definitions, Entry, Segment, compact},
    error::CompileError,
};

struct Frame<'a> {
    key: &'a str,
    segments: &'a [Segment],
    next: usize,
    output: Vec<Segment>,
}

impl<'a> Frame<'a> {
    fn new(key: &'a str, entry: &'a Entry) -> Self {
        Self {
            key,
            segments: entry.segments(),
            next: 0,
            output: Vec::new(),
        }
    }
}

/// Resolve every definition into a [`Codex`].
///
/// Fails on the first embed whose target is not defined, or on the first
/// cycle found; cycles are reported as the ordered key path, closed by the
/// repeated key (`a -> b -> a`).
pub fn resolve(definitions: &Definitions) -> Result<Codex, CompileError> {
    let mut resolved: BTreeMap<String, Entry> = BTreeMap::new();

    for (root_key, root) in definitions {
        if resolved.contains_key(root_key) {
            continue;
        }

        let mut stack = vec![Frame::new(root_key, &root.entry)];
        // key -> index in `stack`
        let mut active: HashMap<&str, usize> = HashMap::from([(root_key.as_str(), 0)]);

        while let Some(frame) = stack.last_mut() {
            let segments = frame.segments;
            let Some(segment) = segments.get(frame.next) else {
                let Some(done) = stack.pop() else { break };
                active.remove(done.key);
                let entry = Entry::new(compact(done.output));
                if let Some(parent) = stack.last_mut() {
                    parent.output.extend(entry.segments().iter().cloned());
                }
                resolved.insert(done.key.to_string(), entry);
                continue;
            };
            frame.next += 1;

            let target = match segment {
                Segment::Embed(target) => target.as_str(),
                other => {
                    frame.output.push(other.clone());
                    continue;
                }
            };

            if let Some(entry) = resolved.get(target) {
                frame.output.extend(entry.segments().iter().cloned());
                continue;
            }

            if let Some(&start) = active.get(target) {
                let mut cycle: Vec<String> =
                    stack[start..].iter().map(|f| f.key.to_string()).collect();
                cycle.push(target.to_string());
                return Err(CompileError::CircularReference { cycle });
            }

            let Some((target_key, definition)) = definitions.get_key_value(target) else {
                return Err(CompileError::MissingReference {
                    key: frame.key.to_string(),
                    origin: definitions.get(frame.key).map(|d| d.embed_origin(target)),
                    missing: target.to_string(),
                });
            };

            active.insert(target_key.as_str(), stack.len());
            stack.push(Frame::new(target_key, &definition.entry));
        }
    }

    tracing::debug!("resolved {} entries", resolved.len());
    Ok(Codex::new(resolved))
}

/// Resolve a standalone entry against an already resolved codex.
///
/// Used for the fail entry, which is not part of the codex itself and so can
/// never take part in a cycle.
pub fn resolve_entry(entry: &Entry, codex: &Codex, name: &str) -> Result<Entry, CompileError> {
    let mut output = Vec::with_capacity(entry.segments().len());
    for segment in entry.segments() {
        match segment {
            Segment::Embed(target) => match codex.get(target) {
                Some(embedded) => output.extend(embedded.segments().iter().cloned()),
                None => {
                    return Err(CompileError::MissingReference {
                        key: name.to_string(),
                        origin: None,
                        missing: target.clone(),
                    });
                }
            },
            other => output.push(other.clone()),
        }
    }
    Ok(Entry::new(compact(output)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{Origin, Position, delimiters::Delimiters, parser::parse_source};

    fn definitions(text: &str) -> Definitions {
        parse_source("main.txt", text, &Delimiters::default()).unwrap()
    }

    fn cycle_of(err: CompileError) -> Vec<String> {
        match err {
            CompileError::CircularReference { cycle } => cycle,
            other => panic!("expected circular reference, got {other:?}"),
        }
    }

    #[test]
    fn test_inlines_embed() {
        let codex = resolve(&definitions("[:a:]{:<:b:>!:}[:b:]{:world:}")).unwrap();
        assert_eq!(codex.get("a").unwrap().segments(), &[Segment::literal("world!")]);
        assert_eq!(codex.get("b").unwrap().segments(), &[Segment::literal("world")]);
    }

    #[test]
    fn test_inlines_nested_embeds_with_variables() {
        let text = "[:letter:]{:<:head:>Body<:foot:>:}\
                    [:head:]{:Dear (:name:),\n:}\
                    [:foot:]{:\n<:sig:>:}\
                    [:sig:]{:Regards, (:sender:):}";
        let codex = resolve(&definitions(text)).unwrap();
        assert_eq!(
            codex.get("letter").unwrap().segments(),
            &[
                Segment::literal("Dear "),
                Segment::variable("name"),
                Segment::literal(",\nBody\nRegards, "),
                Segment::variable("sender"),
            ]
        );
    }

    #[test]
    fn test_embedded_entry_is_not_mutated() {
        let defs = definitions("[:a:]{:x<:b:>y:}[:b:]{:(:v:):}");
        let codex = resolve(&defs).unwrap();
        assert_eq!(codex.get("b").unwrap().segments(), &[Segment::variable("v")]);
        assert_eq!(
            codex.get("a").unwrap().segments(),
            &[
                Segment::literal("x"),
                Segment::variable("v"),
                Segment::literal("y"),
            ]
        );
        assert_eq!(defs["a"].entry.embeds().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_same_entry_embedded_twice() {
        let codex = resolve(&definitions("[:a:]{:<:b:>-<:b:>:}[:b:]{:x:}")).unwrap();
        assert_eq!(codex.get("a").unwrap().segments(), &[Segment::literal("x-x")]);
    }

    #[test]
    fn test_two_entry_cycle() {
        let err = resolve(&definitions("[:a:]{:<:b:>:}[:b:]{:<:a:>:}")).unwrap_err();
        assert_eq!(cycle_of(err), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_self_cycle() {
        let err = resolve(&definitions("[:a:]{:again <:a:>:}")).unwrap_err();
        assert_eq!(cycle_of(err), vec!["a", "a"]);
    }

    #[test]
    fn test_cycle_path_excludes_entry_prefix() {
        let err =
            resolve(&definitions("[:a:]{:<:b:>:}[:b:]{:<:c:>:}[:c:]{:<:b:>:}")).unwrap_err();
        assert_eq!(cycle_of(err), vec!["b", "c", "b"]);
    }

    #[test]
    fn test_missing_reference() {
        let err = resolve(&definitions("[:a:]{:ok:}\n[:b:]{:<:nowhere:>:}")).unwrap_err();
        match err {
            CompileError::MissingReference {
                key,
                origin,
                missing,
            } => {
                assert_eq!(key, "b");
                assert_eq!(missing, "nowhere");
                // points at the embed, not at the label of `b`
                assert_eq!(origin, Some(Origin::new("main.txt", Position::new(2, 8))));
            }
            other => panic!("expected missing reference, got {other:?}"),
        }
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 5_000;
        let mut text = String::new();
        for i in 0..depth {
            text.push_str(&format!("[:k{i}:]{{:<:k{}:>:}}", i + 1));
        }
        text.push_str(&format!("[:k{depth}:]{{:end:}}"));
        let codex = resolve(&definitions(&text)).unwrap();
        assert_eq!(codex.get("k0").unwrap().segments(), &[Segment::literal("end")]);
        assert_eq!(codex.len(), depth + 1);
    }

    #[test]
    fn test_resolve_entry_against_codex() {
        let codex = resolve(&definitions("[:brand:]{:Glossa:}")).unwrap();
        let entry = Entry::new(vec![
            Segment::embed("brand"),
            Segment::literal(": no text for "),
            Segment::variable("__key__"),
        ]);
        let resolved = resolve_entry(&entry, &codex, "<fail entry>").unwrap();
        assert_eq!(
            resolved.segments(),
            &[
                Segment::literal("Glossa: no text for "),
                Segment::variable("__key__"),
            ]
        );

        let err = resolve_entry(&Entry::new(vec![Segment::embed("nope")]), &codex, "<fail entry>")
            .unwrap_err();
        assert!(matches!(err, CompileError::MissingReference { .. }));
    }
}
