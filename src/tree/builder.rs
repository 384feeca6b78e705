//! Tree builder for constructing command trees from a TOML manifest
//!
//! ```toml
//! [[command]]
//! path = "foo bar"          # words from the root; intermediate nodes are created
//! result = 1                # omit to register a non-executable group
//! output = "bar ran for {sender}"
//!
//! [[command]]
//! path = "fb"
//! shadow = "foo bar"        # proxy node resolving to another command
//!
//! [[detached]]
//! name = "bar#client"       # node reachable only through variant links
//! result = 1
//!
//! [[link]]
//! from = "foo bar"
//! kind = "client_mirror"    # client_mirror | wrapped_cache | unwrapped_cache
//! to = "@bar#client"        # '@' addresses a detached node by name
//! ```

use crate::command::{Command, Handler};
use crate::error::{ApiError, TreeError};
use crate::path::split_segments;
use crate::tree::invocation::Invocation;
use crate::tree::CommandTree;
use crate::types::{NodeId, ResultCode, VariantKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Parsed manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeManifest {
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandSpec>,

    #[serde(default)]
    pub detached: Vec<DetachedSpec>,

    #[serde(default, rename = "link")]
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    pub path: String,
    #[serde(default)]
    pub result: Option<ResultCode>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub shadow: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachedSpec {
    pub name: String,
    #[serde(default)]
    pub result: Option<ResultCode>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub from: String,
    pub kind: VariantKind,
    pub to: String,
}

impl TreeManifest {
    pub fn from_toml_str(input: &str) -> Result<Self, TreeError> {
        toml::from_str(input).map_err(|e| TreeError::InvalidManifest(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;
        Ok(Self::from_toml_str(&content)?)
    }
}

/// Handler built from a manifest entry: emits its output line, then returns
/// its fixed result code.
struct ManifestHandler {
    result: ResultCode,
    output: Option<String>,
}

impl Handler<Invocation> for ManifestHandler {
    fn run(&self, context: &Invocation) -> ResultCode {
        if let Some(output) = &self.output {
            context.emit(
                output
                    .replace("{sender}", context.sender())
                    .replace("{input}", context.input()),
            );
        }
        self.result
    }
}

fn manifest_command(result: Option<ResultCode>, output: Option<String>) -> Option<Command<Invocation>> {
    result.map(|result| Command::new(ManifestHandler { result, output }))
}

/// Builds a [`CommandTree`] from a [`TreeManifest`].
pub struct TreeBuilder {
    manifest: TreeManifest,
}

impl TreeBuilder {
    pub fn new(manifest: TreeManifest) -> Self {
        Self { manifest }
    }

    /// Build the tree.
    ///
    /// Detached nodes are created first, then plain commands, then shadows (so
    /// their handles exist), then variant links.
    #[instrument(skip(self), fields(commands = self.manifest.commands.len()))]
    pub fn build(&self) -> Result<CommandTree<Invocation>, TreeError> {
        let start = Instant::now();
        let mut tree = CommandTree::new();
        let mut detached: HashMap<String, NodeId> = HashMap::new();
        let mut defined: HashSet<NodeId> = HashSet::new();

        for spec in &self.manifest.detached {
            if detached.contains_key(&spec.name) {
                return Err(TreeError::InvalidManifest(format!(
                    "detached node '{}' defined twice",
                    spec.name
                )));
            }
            let id = tree.add_detached(
                spec.name.clone(),
                manifest_command(spec.result, spec.output.clone()),
            );
            detached.insert(spec.name.clone(), id);
        }

        let (shadows, plain): (Vec<&CommandSpec>, Vec<&CommandSpec>) = self
            .manifest
            .commands
            .iter()
            .partition(|spec| spec.shadow.is_some());

        let shadow_words = shadows
            .iter()
            .map(|spec| words_of(&spec.path))
            .collect::<Result<Vec<_>, _>>()?;
        for spec in &self.manifest.commands {
            let words = words_of(&spec.path)?;
            if let Some(shadow) = shadow_words
                .iter()
                .find(|shadow| shadow.len() < words.len() && words.starts_with(shadow.as_slice()))
            {
                return Err(TreeError::InvalidManifest(format!(
                    "command '{}' is nested under shadow '{}'",
                    spec.path,
                    shadow.join(" ")
                )));
            }
        }

        for spec in plain {
            let words = words_of(&spec.path)?;
            let (parent, leaf) = ensure_parent(&mut tree, &words)?;
            let existing = tree
                .get(parent)
                .and_then(|p| p.children().find(|(name, _)| *name == leaf).map(|(_, id)| id));
            let id = match existing {
                Some(existing) => existing,
                None => tree.add_node(parent, leaf, None)?,
            };
            if !defined.insert(id) {
                return Err(TreeError::InvalidManifest(format!(
                    "command '{}' defined twice",
                    spec.path
                )));
            }
            tree.set_node_command(id, manifest_command(spec.result, spec.output.clone()))?;
            debug!(path = %spec.path, node = %id, "Registered command");
        }

        // A shadow may point at another shadow declared later, so build in
        // rounds until every handle resolves.
        let mut pending: Vec<(&CommandSpec, Vec<String>)> =
            shadows.into_iter().zip(shadow_words).collect();
        while !pending.is_empty() {
            let before = pending.len();
            let mut unresolved = Vec::new();
            for (spec, words) in pending {
                let handle_ref = spec.shadow.as_deref().unwrap_or_default();
                match resolve_ref(&tree, &detached, handle_ref) {
                    Ok(handle) => {
                        let (parent, leaf) = ensure_parent(&mut tree, &words)?;
                        let id = tree.add_shadow(parent, leaf, handle)?;
                        debug!(path = %spec.path, node = %id, handle = %handle, "Registered shadow");
                    }
                    Err(e) => unresolved.push((spec, words, e)),
                }
            }
            if unresolved.len() == before {
                if let Some((_, _, e)) = unresolved.into_iter().next() {
                    return Err(e);
                }
                break;
            }
            pending = unresolved
                .into_iter()
                .map(|(spec, words, _)| (spec, words))
                .collect();
        }

        for link in &self.manifest.links {
            let from = resolve_ref(&tree, &detached, &link.from)?;
            let to = resolve_ref(&tree, &detached, &link.to)?;
            tree.link_variant(from, link.kind, to)?;
        }

        info!(
            node_count = tree.len(),
            duration_ms = start.elapsed().as_millis(),
            "Command tree build completed"
        );
        Ok(tree)
    }
}

fn words_of(path: &str) -> Result<Vec<String>, TreeError> {
    let words = split_segments(path);
    if words.is_empty() {
        return Err(TreeError::InvalidManifest(format!("empty command path '{}'", path)));
    }
    Ok(words)
}

/// Walk to the parent of the last word, creating missing groups.
fn ensure_parent<'w, C>(
    tree: &mut CommandTree<C>,
    words: &'w [String],
) -> Result<(NodeId, &'w str), TreeError> {
    let (leaf, parents) = words
        .split_last()
        .ok_or_else(|| TreeError::InvalidManifest("empty command path".to_string()))?;
    let mut current = tree.root();
    for word in parents {
        let existing = tree
            .get(current)
            .and_then(|n| n.children().find(|(name, _)| name == word).map(|(_, id)| id));
        current = match existing {
            Some(id) => id,
            None => tree.add_node(current, word.clone(), None)?,
        };
        if tree.get(current).and_then(|n| n.shadow_of()).is_some() {
            return Err(TreeError::InvalidManifest(format!(
                "'{}' is a shadow and cannot have children",
                words.join(" ")
            )));
        }
    }
    Ok((current, leaf.as_str()))
}

fn resolve_ref<C>(
    tree: &CommandTree<C>,
    detached: &HashMap<String, NodeId>,
    reference: &str,
) -> Result<NodeId, TreeError> {
    if let Some(name) = reference.strip_prefix('@') {
        return detached
            .get(name)
            .copied()
            .ok_or_else(|| TreeError::InvalidManifest(format!("unknown detached node '{}'", name)));
    }
    tree.lookup(&split_segments(reference))
        .filter(|id| *id != tree.root())
        .ok_or_else(|| TreeError::InvalidManifest(format!("unknown command '{}'", reference)))
}
