//! Bridge call decoding.
//!
//! Calls arrive as a method name plus positional JSON arguments, in the
//! order the JavaScript side declares them. [`Command::decode`] checks the
//! shapes and produces a typed command; the manager never sees raw values.

use serde::{Deserialize, Serialize};

use super::response::CallbackId;
use crate::error::UiError;
use crate::types::{Point, PropMap, Tag, Value};

/// One raw bridge call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Callback id of a query call, read from its fixed position even when
    /// the other arguments are malformed.
    pub fn callback_id(&self) -> Option<CallbackId> {
        let index = match self.method.as_str() {
            "measure" => 1,
            "findSubviewIn" => 2,
            _ => return None,
        };
        self.args.get(index).and_then(Value::as_u64)
    }
}

/// Structural mutation batch for one container.
///
/// `add_child_tags[i]` goes to `add_at_indices[i]`; the remove indices refer
/// to the container's children sorted by z-order before the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenUpdate {
    pub move_from: Vec<usize>,
    pub move_to: Vec<usize>,
    pub add_child_tags: Vec<Tag>,
    pub add_at_indices: Vec<usize>,
    pub remove_at_indices: Vec<usize>,
}

impl ChildrenUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag` at destination index `index`.
    pub fn add(mut self, tag: Tag, index: usize) -> Self {
        self.add_child_tags.push(tag);
        self.add_at_indices.push(index);
        self
    }

    /// Remove the child currently at `index`.
    pub fn remove(mut self, index: usize) -> Self {
        self.remove_at_indices.push(index);
        self
    }

    /// Remove every child of a container holding `count` children.
    pub fn remove_all(count: usize) -> Self {
        Self {
            remove_at_indices: (0..count).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add_child_tags.is_empty()
            && self.add_at_indices.is_empty()
            && self.remove_at_indices.is_empty()
            && self.move_from.is_empty()
            && self.move_to.is_empty()
    }
}

/// A decoded UI manager command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateView {
        tag: Tag,
        view_name: String,
        root_tag: Tag,
        props: PropMap,
    },
    UpdateView {
        tag: Tag,
        view_name: String,
        props: PropMap,
    },
    ManageChildren {
        container_tag: Tag,
        update: ChildrenUpdate,
    },
    RemoveSubviewsFromContainer {
        container_tag: Tag,
    },
    Measure {
        tag: Tag,
        callback: CallbackId,
    },
    FindSubviewIn {
        tag: Tag,
        point: Point,
        callback: CallbackId,
    },
    SetJsResponder {
        tag: Tag,
        block_native_responder: bool,
    },
    ClearJsResponder,
    Blur {
        tag: Tag,
    },
}

impl Command {
    /// Method name as the bridge spells it.
    pub fn method(&self) -> &'static str {
        match self {
            Self::CreateView { .. } => "createView",
            Self::UpdateView { .. } => "updateView",
            Self::ManageChildren { .. } => "manageChildren",
            Self::RemoveSubviewsFromContainer { .. } => "removeSubviewsFromContainerWithID",
            Self::Measure { .. } => "measure",
            Self::FindSubviewIn { .. } => "findSubviewIn",
            Self::SetJsResponder { .. } => "setJSResponder",
            Self::ClearJsResponder => "clearJSResponder",
            Self::Blur { .. } => "blur",
        }
    }

    /// Callback owed a response, if the command carries one.
    pub fn callback(&self) -> Option<CallbackId> {
        match self {
            Self::Measure { callback, .. } | Self::FindSubviewIn { callback, .. } => {
                Some(*callback)
            }
            _ => None,
        }
    }

    pub fn decode_call(call: &Call) -> Result<Self, UiError> {
        Self::decode(&call.method, &call.args)
    }

    /// Decode positional bridge arguments for `method`.
    pub fn decode(method: &str, args: &[Value]) -> Result<Self, UiError> {
        let args = Args { method, args };

        Ok(match method {
            "createView" => Self::CreateView {
                tag: args.tag(0)?,
                view_name: args.string(1)?,
                root_tag: args.tag(2)?,
                props: args.props(3)?,
            },
            "updateView" => Self::UpdateView {
                tag: args.tag(0)?,
                view_name: args.string(1)?,
                props: args.props(2)?,
            },
            "manageChildren" => Self::ManageChildren {
                container_tag: args.tag(0)?,
                update: ChildrenUpdate {
                    move_from: args.indices(1)?,
                    move_to: args.indices(2)?,
                    add_child_tags: args.tags(3)?,
                    add_at_indices: args.indices(4)?,
                    remove_at_indices: args.indices(5)?,
                },
            },
            "removeSubviewsFromContainerWithID" => Self::RemoveSubviewsFromContainer {
                container_tag: args.tag(0)?,
            },
            "measure" => Self::Measure {
                tag: args.tag(0)?,
                callback: args.callback(1)?,
            },
            "findSubviewIn" => Self::FindSubviewIn {
                tag: args.tag(0)?,
                point: args.point(1)?,
                callback: args.callback(2)?,
            },
            "setJSResponder" => Self::SetJsResponder {
                tag: args.tag(0)?,
                block_native_responder: args.flag(1)?,
            },
            "clearJSResponder" => Self::ClearJsResponder,
            "blur" => Self::Blur { tag: args.tag(0)? },
            _ => {
                return Err(UiError::UnknownMethod {
                    method: method.to_string(),
                })
            }
        })
    }
}

// =============================================================================
// Positional argument access
// =============================================================================

struct Args<'a> {
    method: &'a str,
    args: &'a [Value],
}

impl Args<'_> {
    fn bad(&self, reason: impl Into<String>) -> UiError {
        UiError::BadArguments {
            method: self.method.to_string(),
            reason: reason.into(),
        }
    }

    fn get(&self, index: usize) -> &Value {
        self.args.get(index).unwrap_or(&Value::Null)
    }

    fn tag(&self, index: usize) -> Result<Tag, UiError> {
        self.get(index)
            .as_u64()
            .and_then(|v| Tag::try_from(v).ok())
            .ok_or_else(|| self.bad(format!("argument {index} is not a view tag")))
    }

    fn callback(&self, index: usize) -> Result<CallbackId, UiError> {
        self.get(index)
            .as_u64()
            .ok_or_else(|| self.bad(format!("argument {index} is not a callback id")))
    }

    fn string(&self, index: usize) -> Result<String, UiError> {
        self.get(index)
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.bad(format!("argument {index} is not a string")))
    }

    fn flag(&self, index: usize) -> Result<bool, UiError> {
        match self.get(index) {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            _ => Err(self.bad(format!("argument {index} is not a boolean"))),
        }
    }

    fn props(&self, index: usize) -> Result<PropMap, UiError> {
        match self.get(index) {
            Value::Null => Ok(PropMap::new()),
            Value::Object(map) => Ok(map.clone()),
            _ => Err(self.bad(format!("argument {index} is not a property map"))),
        }
    }

    fn list(&self, index: usize) -> Result<&[Value], UiError> {
        match self.get(index) {
            Value::Null => Ok(&[][..]),
            Value::Array(items) => Ok(items.as_slice()),
            _ => Err(self.bad(format!("argument {index} is not an array"))),
        }
    }

    fn indices(&self, index: usize) -> Result<Vec<usize>, UiError> {
        self.list(index)?
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| self.bad(format!("argument {index} holds a non-index value")))
            })
            .collect()
    }

    fn tags(&self, index: usize) -> Result<Vec<Tag>, UiError> {
        self.list(index)?
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|n| Tag::try_from(n).ok())
                    .ok_or_else(|| self.bad(format!("argument {index} holds a non-tag value")))
            })
            .collect()
    }

    /// `[x, y]` or `{ "x": .., "y": .. }`.
    fn point(&self, index: usize) -> Result<Point, UiError> {
        let coords = match self.get(index) {
            Value::Array(items) if items.len() == 2 => (items[0].as_f64(), items[1].as_f64()),
            Value::Object(map) => (
                map.get("x").and_then(Value::as_f64),
                map.get("y").and_then(Value::as_f64),
            ),
            _ => (None, None),
        };

        match coords {
            (Some(x), Some(y)) => Ok(Point::new(x as f32, y as f32)),
            _ => Err(self.bad(format!("argument {index} is not a point"))),
        }
    }
}
