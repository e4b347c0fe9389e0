use std::collections::HashMap;

use crate::error::RuntimeError;

/// Identifies one scope frame inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The global frame. It exists for the whole run and is never popped.
    pub const GLOBAL: Self = Self(0);
}

#[derive(Debug, Default)]
struct Frame {
    values: HashMap<String, i64>,
    parent: Option<ScopeId>,
}

/// A chain of lexical scopes mapping names to integers.
///
/// Frames live on a stack; the innermost (most recently pushed) frame is the
/// current one. Each frame links to a parent, and lookups walk those links,
/// not the stack order. The interpreter opens one frame per function call
/// with the global frame as parent, so a callee never sees its caller's
/// locals.
///
/// # Example
/// ```
/// use sprola::interpreter::environment::{Environment, ScopeId};
///
/// let mut env = Environment::new();
/// env.define("x", 10);
///
/// env.push_scope(ScopeId::GLOBAL);
/// env.define("x", 99);
/// assert_eq!(env.get("x").unwrap(), 99);
///
/// env.pop_scope();
/// assert_eq!(env.get("x").unwrap(), 10);
/// ```
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    /// The innermost frame.
    #[must_use]
    pub const fn current(&self) -> ScopeId {
        ScopeId(self.frames.len() - 1)
    }

    /// Number of live frames, the global frame included.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Opens a new, empty frame whose parent is `parent` and makes it
    /// current.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.frames.push(Frame { values: HashMap::new(),
                                 parent: Some(parent), });
        self.current()
    }

    /// Discards the innermost frame. The global frame is never removed.
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Binds `name` in the current frame, replacing any binding the frame
    /// already has. Bindings in outer frames are shadowed, not touched.
    pub fn define(&mut self, name: &str, value: i64) {
        let scope = self.current();
        self.frames[scope.0].values.insert(name.to_string(), value);
    }

    /// Updates the nearest binding of `name`, starting at the current frame
    /// and following parent links.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no frame in the chain binds
    /// `name`.
    pub fn assign(&mut self, name: &str, value: i64) -> Result<(), RuntimeError> {
        let scope = self.resolve(self.current(), name)?;
        if let Some(slot) = self.frames[scope.0].values.get_mut(name) {
            *slot = value;
        }
        Ok(())
    }

    /// Reads `name`, starting at the current frame.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no frame in the chain binds
    /// `name`.
    pub fn get(&self, name: &str) -> Result<i64, RuntimeError> {
        self.get_in(self.current(), name)
    }

    /// Reads `name`, starting at `scope` instead of the current frame.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no frame in the chain binds
    /// `name`.
    pub fn get_in(&self, scope: ScopeId, name: &str) -> Result<i64, RuntimeError> {
        let owner = self.resolve(scope, name)?;
        self.frames[owner.0]
            .values
            .get(name)
            .copied()
            .ok_or_else(|| undefined(name))
    }

    /// Finds the frame that owns `name`, walking outward from `start`.
    fn resolve(&self, start: ScopeId, name: &str) -> Result<ScopeId, RuntimeError> {
        let mut scope = Some(start);
        while let Some(id) = scope {
            let frame = self.frames
                            .get(id.0)
                            .ok_or_else(|| undefined(name))?;
            if frame.values.contains_key(name) {
                return Ok(id);
            }
            scope = frame.parent;
        }
        Err(undefined(name))
    }
}

fn undefined(name: &str) -> RuntimeError {
    RuntimeError::UndefinedVariable { name: name.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadowing_does_not_touch_parent() {
        let mut env = Environment::new();
        env.define("x", 10);

        let child = env.push_scope(ScopeId::GLOBAL);
        env.define("x", 99);

        assert_eq!(env.get_in(child, "x").unwrap(), 99);
        assert_eq!(env.get_in(ScopeId::GLOBAL, "x").unwrap(), 10);
    }

    #[test]
    fn assign_from_child_updates_parent() {
        let mut env = Environment::new();
        env.define("x", 1);

        env.push_scope(ScopeId::GLOBAL);
        env.assign("x", 5).unwrap();
        env.pop_scope();

        assert_eq!(env.get("x").unwrap(), 5);
    }

    #[test]
    fn assign_to_undefined_fails() {
        let mut env = Environment::new();
        env.push_scope(ScopeId::GLOBAL);

        let err = env.assign("y", 1).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'y'");
        assert!(env.get("y").is_err());
    }

    #[test]
    fn redefine_overwrites_in_same_frame() {
        let mut env = Environment::new();
        env.define("n", 1);
        env.define("n", 2);
        assert_eq!(env.get("n").unwrap(), 2);
    }

    #[test]
    fn sibling_frames_are_isolated() {
        let mut env = Environment::new();

        env.push_scope(ScopeId::GLOBAL);
        env.define("local", 7);
        // A nested call frame links to the globals, not to the caller.
        env.push_scope(ScopeId::GLOBAL);
        assert!(env.get("local").is_err());

        env.pop_scope();
        assert_eq!(env.get("local").unwrap(), 7);
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut env = Environment::new();
        env.define("g", 3);
        env.pop_scope();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.get("g").unwrap(), 3);
    }
}
