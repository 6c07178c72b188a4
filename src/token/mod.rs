//! `GhostToken` - the capability that gates every graph cell.
//!
//! A token is a zero-sized value branded with an invariant lifetime `'brand`.
//! Graph nodes store their neighbor lists in [`GhostCell`](crate::GhostCell)s of
//! the same brand, so reading adjacency needs `&GhostToken<'brand>` and wiring
//! edges needs `&mut GhostToken<'brand>`.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is **not** `Copy`/`Clone`. Any safe API that hands out
//! `&mut T` from a shared cell requires `&mut GhostToken<'brand>`, and the borrow
//! checker forbids two live mutable borrows of one token.

use core::marker::PhantomData;

/// A marker that is invariant in `'id`.
///
/// Brands must not shrink or grow through subtyping, otherwise two unrelated
/// token scopes could be unified under one brand.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

/// A zero-sized token that controls access to `GhostCell`s of its brand.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a fresh brand and runs `f` with its token.
    ///
    /// The closure is generic over the brand, so nothing branded can escape it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ghostclone::{GhostCell, GhostToken};
    ///
    /// let result = GhostToken::new(|mut token| {
    ///     let cell = GhostCell::new(42);
    ///     *cell.borrow_mut(&mut token) = 100;
    ///     *cell.borrow(&token)
    /// });
    /// assert_eq!(result, 100);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Runs `f` inside a nested, unrelated brand.
    ///
    /// Handy when a scratch graph must not be mixable with the current one.
    #[inline(always)]
    pub fn with_scoped<F, R>(&self, f: F) -> R
    where
        F: for<'sub> FnOnce(GhostToken<'sub>) -> R,
    {
        GhostToken::new(f)
    }
}
