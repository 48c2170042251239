use std::fmt;

use bumpalo::Bump;

/// Bump allocator backing every variable-length part of decoded descriptors.
///
/// Descriptors borrow their arrays, strings and nested blocks from the arena
/// (`&'a [T]`, `&'a str`, `&'a T`), so the arena must outlive the registry
/// that holds them. There is no individual deallocation: memory is released
/// all at once when the arena is dropped.
///
/// Values placed in the arena never have their destructors run. Descriptor
/// payloads are plain data, which is what the `Copy` bounds below enforce.
pub struct Arena {
    bump: Bump,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena with an initial chunk of at least `bytes` bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Move a single value into the arena.
    pub fn allocate<T: Copy>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// Allocate a single default-initialized value.
    pub fn allocate_default<T: Copy + Default>(&self) -> &mut T {
        self.bump.alloc(T::default())
    }

    /// Allocate `count` default-initialized elements, to be filled by index.
    pub fn allocate_n_default<T: Copy + Default>(&self, count: usize) -> &mut [T] {
        self.bump.alloc_slice_fill_default(count)
    }

    /// Allocate `count` elements produced by `f(index)`, without clearing
    /// them first.
    pub fn allocate_n_with<T, F>(&self, count: usize, f: F) -> &mut [T]
    where
        T: Copy,
        F: FnMut(usize) -> T,
    {
        self.bump.alloc_slice_fill_with(count, f)
    }

    /// Allocate `count` elements produced by a fallible `f(index)`.
    ///
    /// Elements are decoded into a scratch vector first so that a failure
    /// part-way through leaves no half-initialized slice behind; the arena
    /// allocation happens only once every element succeeded.
    pub fn try_allocate_n_with<T, E, F>(&self, count: usize, mut f: F) -> Result<&[T], E>
    where
        T: Copy,
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut scratch = Vec::with_capacity(count);
        for index in 0..count {
            scratch.push(f(index)?);
        }
        let slice: &[T] = self.bump.alloc_slice_copy(&scratch);
        Ok(slice)
    }

    /// Copy a slice into the arena.
    pub fn allocate_copy<T: Copy>(&self, src: &[T]) -> &mut [T] {
        self.bump.alloc_slice_copy(src)
    }

    /// Copy a string into the arena.
    pub fn allocate_str(&self, src: &str) -> &str {
        self.bump.alloc_str(src)
    }

    /// Total bytes handed out by the underlying allocator, including
    /// allocations that later became unreachable.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("allocated_bytes", &self.allocated_bytes())
            .finish()
    }
}
