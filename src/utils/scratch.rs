//! Stack-discipline scratch memory.
//!
//! All the temporary buffers used by the tree traversals, GJK and EPA live in workspaces that
//! are reused from one call to the next. Every algorithm acquires its scratch memory through a
//! scope guard, and the guard gives the memory back on every exit path (including early
//! returns), so repeated calls within a frame never leak nor fragment memory.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

/// A workspace that can be restored to its pristine, empty, state.
pub trait ScratchWorkspace {
    /// Releases every temporary element held by this workspace, keeping its allocations.
    fn restore(&mut self);
}

/// A guard restoring a [`ScratchWorkspace`] when dropped.
pub struct ScratchGuard<'a, W: ScratchWorkspace + ?Sized> {
    workspace: &'a mut W,
}

impl<'a, W: ScratchWorkspace + ?Sized> ScratchGuard<'a, W> {
    /// Acquires the workspace for the duration of the guard.
    ///
    /// The workspace is restored on acquisition too, so leftovers from a previous panic
    /// never leak into the new computation.
    pub fn new(workspace: &'a mut W) -> Self {
        workspace.restore();
        Self { workspace }
    }
}

impl<W: ScratchWorkspace + ?Sized> Deref for ScratchGuard<'_, W> {
    type Target = W;

    #[inline]
    fn deref(&self) -> &W {
        self.workspace
    }
}

impl<W: ScratchWorkspace + ?Sized> DerefMut for ScratchGuard<'_, W> {
    #[inline]
    fn deref_mut(&mut self) -> &mut W {
        self.workspace
    }
}

impl<W: ScratchWorkspace + ?Sized> Drop for ScratchGuard<'_, W> {
    fn drop(&mut self) {
        self.workspace.restore();
    }
}

/// A bump allocator with mark/restore semantics.
///
/// Elements are only ever accessed through a [`ScratchScope`] which remembers the stack height
/// at its creation and truncates the stack back to that mark when dropped.
#[derive(Clone, Debug, Default)]
pub struct ScratchStack<T> {
    data: Vec<T>,
}

impl<T> ScratchStack<T> {
    /// Creates an empty scratch stack.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty scratch stack able to hold `capacity` elements without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// The current height of the stack.
    #[inline]
    pub fn mark(&self) -> usize {
        self.data.len()
    }

    /// The number of elements that can be pushed without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Makes room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Opens a new scope on top of the stack.
    pub fn scope(&mut self) -> ScratchScope<'_, T> {
        let mark = self.data.len();
        ScratchScope {
            data: &mut self.data,
            mark,
        }
    }
}

impl<T> ScratchWorkspace for ScratchStack<T> {
    fn restore(&mut self) {
        self.data.clear();
    }
}

/// A region of a [`ScratchStack`] released when dropped.
///
/// Dereferences to the slice of elements pushed since the scope was opened.
pub struct ScratchScope<'a, T> {
    data: &'a mut Vec<T>,
    mark: usize,
}

impl<T> ScratchScope<'_, T> {
    /// Pushes an element on top of this scope.
    #[inline]
    pub fn push(&mut self, elt: T) {
        self.data.push(elt);
    }

    /// Pops the last element pushed in this scope, if any.
    ///
    /// Elements owned by parent scopes are never returned.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.data.len() > self.mark {
            self.data.pop()
        } else {
            None
        }
    }

    /// Removes every element of this scope.
    #[inline]
    pub fn clear(&mut self) {
        self.data.truncate(self.mark);
    }

    /// Opens a nested scope on top of this one.
    pub fn scope(&mut self) -> ScratchScope<'_, T> {
        let mark = self.data.len();
        ScratchScope {
            data: &mut *self.data,
            mark,
        }
    }
}

impl<T> Deref for ScratchScope<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data[self.mark..]
    }
}

impl<T> DerefMut for ScratchScope<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data[self.mark..]
    }
}

impl<T> Drop for ScratchScope<'_, T> {
    fn drop(&mut self) {
        self.data.truncate(self.mark);
    }
}
