//! Mock server state management.
//!
//! Provides the in-memory document store for the mock slick server.
//! Items are kept as JSON objects. Nested collections live inside their
//! parent item the way slick embeds them: the releases of project `p1`
//! are the `releases` array of that project, and its builds are the
//! `builds` array of each release.

use std::collections::HashMap;
use std::sync::Arc;

use md5::{Digest, Md5};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::Model;

/// Chunk size handed out for new stored files unless set otherwise.
pub const MOCK_CHUNK_SIZE: i64 = 262_144;

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Top-level collections by URL segment (e.g. "projects").
    pub collections: HashMap<String, Vec<Value>>,

    /// Endpoints that answer with one object (e.g. "version").
    pub singletons: HashMap<String, Value>,

    /// Received chunks per stored file id, in arrival order.
    pub chunks: HashMap<String, Vec<Vec<u8>>>,

    /// Chunk size assigned to stored files created without one.
    pub chunk_size: i64,

    /// Number of upcoming requests to answer with HTTP 500.
    pub fail_next: u32,

    /// `METHOD path` of every request received, in order.
    pub requests: Vec<String>,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            collections: HashMap::new(),
            singletons: HashMap::new(),
            chunks: HashMap::new(),
            chunk_size: MOCK_CHUNK_SIZE,
            fail_next: 0,
            requests: Vec::new(),
            next_id: 1,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a model to a top-level collection.
    ///
    /// # Panics
    ///
    /// Panics if the model can't be serialized; fixtures always can.
    pub fn with_item<M: Model>(mut self, collection: &str, item: &M) -> Self {
        let value = item.to_dict().expect("fixture serializes");
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(value);
        self
    }

    /// Serve `item` as the single object behind `endpoint`.
    pub fn with_singleton<M: Model>(mut self, endpoint: &str, item: &M) -> Self {
        let value = item.to_dict().expect("fixture serializes");
        self.singletons.insert(endpoint.to_string(), value);
        self
    }

    /// Answer the next `count` requests with HTTP 500.
    pub fn with_failures(mut self, count: u32) -> Self {
        self.fail_next = count;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: i64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Read one item back as a model.
    pub fn item_as<M: Model>(&self, collection: &str, id: &str) -> Option<Result<M>> {
        self.item(&[collection.to_string(), id.to_string()])
            .map(|value| M::from_dict(value.clone()))
    }

    /// Generate an id in the 24-hex-digit shape slick uses.
    pub fn next_id(&mut self) -> String {
        let id = format!("{:024x}", self.next_id);
        self.next_id += 1;
        id
    }

    /// The array behind a collection path: `collection (/id/field)*`.
    pub fn array(&self, path: &[String]) -> Option<&Vec<Value>> {
        let (first, rest) = path.split_first()?;
        let mut array = self.collections.get(first)?;
        for pair in rest.chunks(2) {
            let item = find_by_id(array, &pair[0])?;
            array = item.get(pair.get(1)?)?.as_array()?;
        }
        Some(array)
    }

    /// Mutable array behind a collection path, creating empty ones.
    pub fn array_mut(&mut self, path: &[String]) -> Option<&mut Vec<Value>> {
        let (first, rest) = path.split_first()?;
        let mut array = self.collections.entry(first.clone()).or_default();
        for pair in rest.chunks(2) {
            let field = pair.get(1)?;
            let item = array
                .iter_mut()
                .find(|value| id_of(value) == Some(pair[0].as_str()))?;
            array = item
                .as_object_mut()?
                .entry(field.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()?;
        }
        Some(array)
    }

    /// The item behind an item path: `collection/id (/field/id)*`.
    pub fn item(&self, path: &[String]) -> Option<&Value> {
        let (id, parent) = path.split_last()?;
        find_by_id(self.array(parent)?, id)
    }

    pub fn item_mut(&mut self, path: &[String]) -> Option<&mut Value> {
        let (id, parent) = path.split_last()?;
        self.array_mut(parent)?
            .iter_mut()
            .find(|value| id_of(value) == Some(id.as_str()))
    }

    /// Insert a new item, assigning an id when it has none.
    pub fn insert(&mut self, path: &[String], mut item: Value) -> Option<Value> {
        if id_of(&item).is_none() {
            let id = self.next_id();
            item.as_object_mut()?.insert("id".to_string(), Value::String(id));
        }
        if path.len() == 1 && path[0] == "files" {
            let chunk_size = self.chunk_size;
            item.as_object_mut()?
                .entry("chunkSize")
                .or_insert_with(|| Value::from(chunk_size));
        }
        self.array_mut(path)?.push(item.clone());
        Some(item)
    }

    /// Merge the set fields of `changes` into an existing item.
    pub fn merge(&mut self, path: &[String], changes: Map<String, Value>) -> Option<Value> {
        let item = self.item_mut(path)?.as_object_mut()?;
        for (key, value) in changes {
            if key != "id" {
                item.insert(key, value);
            }
        }
        Some(Value::Object(item.clone()))
    }

    pub fn remove(&mut self, path: &[String]) -> Option<Value> {
        let (id, parent) = path.split_last()?;
        let array = self.array_mut(parent)?;
        let index = array
            .iter()
            .position(|value| id_of(value) == Some(id.as_str()))?;
        Some(array.remove(index))
    }

    /// Find a project by name.
    pub fn project_named(&self, name: &str) -> Option<&Value> {
        self.collections
            .get("projects")?
            .iter()
            .find(|project| project.get("name").and_then(Value::as_str) == Some(name))
    }

    /// Store a chunk and refresh the file's length and md5.
    pub fn add_chunk(&mut self, file_id: &str, chunk: Vec<u8>) -> Option<Value> {
        let chunks = self.chunks.entry(file_id.to_string()).or_default();
        chunks.push(chunk);

        let mut hasher = Md5::new();
        let mut length = 0usize;
        for chunk in chunks.iter() {
            hasher.update(chunk);
            length += chunk.len();
        }
        let md5 = hex::encode(hasher.finalize());

        let path = ["files".to_string(), file_id.to_string()];
        let file = self.item_mut(&path)?.as_object_mut()?;
        file.insert("md5".to_string(), Value::String(md5));
        file.insert("length".to_string(), Value::from(length));
        Some(Value::Object(file.clone()))
    }

    /// All bytes received for a stored file.
    pub fn file_contents(&self, file_id: &str) -> Vec<u8> {
        self.chunks
            .get(file_id)
            .map(|chunks| chunks.concat())
            .unwrap_or_default()
    }

    /// Add a stored testrun to a group, once.
    pub fn add_to_group(&mut self, group_id: &str, testrun_id: &str) -> Option<Value> {
        let testrun = self.item(&["testruns".to_string(), testrun_id.to_string()])?.clone();
        let group = self
            .item_mut(&["testrungroups".to_string(), group_id.to_string()])?
            .as_object_mut()?;
        let members = group
            .entry("testruns")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()?;
        if find_by_id(members, testrun_id).is_none() {
            members.push(testrun);
        }
        Some(Value::Object(group.clone()))
    }

    pub fn remove_from_group(&mut self, group_id: &str, testrun_id: &str) -> Option<Value> {
        let group = self
            .item_mut(&["testrungroups".to_string(), group_id.to_string()])?
            .as_object_mut()?;
        if let Some(members) = group.get_mut("testruns").and_then(Value::as_array_mut) {
            members.retain(|member| id_of(member) != Some(testrun_id));
        }
        Some(Value::Object(group.clone()))
    }
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn find_by_id<'a>(array: &'a [Value], id: &str) -> Option<&'a Value> {
    array.iter().find(|value| id_of(value) == Some(id))
}
