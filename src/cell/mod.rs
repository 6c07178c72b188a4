//! `GhostCell` - token-branded interior mutability.
//!
//! The cell is a thin wrapper over `UnsafeCell`: access is proven exclusive by
//! the borrow of the [`GhostToken`] rather than by a runtime flag, so a graph of
//! `&'arena` node references can still have its adjacency rewired in place.

use core::cell::UnsafeCell;

use crate::token::InvariantLifetime;
use crate::GhostToken;

/// A cell that can only be accessed with a token of the same brand.
pub struct GhostCell<'brand, T> {
    _brand: InvariantLifetime<'brand>,
    value: UnsafeCell<T>,
}

impl<'brand, T> GhostCell<'brand, T> {
    /// Creates a new `GhostCell`.
    pub const fn new(value: T) -> Self {
        Self {
            _brand: InvariantLifetime::new(),
            value: UnsafeCell::new(value),
        }
    }

    /// Consumes the cell, returning the wrapped value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Borrows the cell immutably.
    #[inline(always)]
    pub fn borrow<'a>(&'a self, _token: &'a GhostToken<'brand>) -> &'a T {
        // SAFETY: a shared token borrow rules out any live `&mut` obtained
        // through `borrow_mut` for the whole of `'a`.
        unsafe { &*self.value.get() }
    }

    /// Borrows the cell mutably.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub fn borrow_mut<'a>(&'a self, _token: &'a mut GhostToken<'brand>) -> &'a mut T {
        // SAFETY: the token is linear; holding `&mut GhostToken<'brand>` for `'a`
        // means no other reference into any cell of this brand is live.
        unsafe { &mut *self.value.get() }
    }

    /// Mutable access through exclusive ownership of the cell; no token needed.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Replaces the contained value, returning the old value.
    #[inline]
    pub fn replace(&self, token: &mut GhostToken<'brand>, value: T) -> T {
        core::mem::replace(self.borrow_mut(token), value)
    }
}

impl<'brand, T: Default> Default for GhostCell<'brand, T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<'brand, T> From<T> for GhostCell<'brand, T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// SAFETY: shared access is token-gated, so `&GhostCell` across threads behaves
// like `&T` (reads) or is serialized through the single `&mut GhostToken`.
unsafe impl<'brand, T: Send + Sync> Sync for GhostCell<'brand, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_and_replace() {
        GhostToken::new(|mut token| {
            let cell = GhostCell::new(vec![1, 2]);
            cell.borrow_mut(&mut token).push(3);
            assert_eq!(cell.borrow(&token), &[1, 2, 3]);

            let old = cell.replace(&mut token, Vec::new());
            assert_eq!(old, vec![1, 2, 3]);
            assert!(cell.borrow(&token).is_empty());
        });
    }

    #[test]
    fn get_mut_and_into_inner_need_no_token() {
        let mut cell: GhostCell<'_, u32> = GhostCell::default();
        *cell.get_mut() += 7;
        assert_eq!(cell.into_inner(), 7);
    }
}
