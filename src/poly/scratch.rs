/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Reusable output buffers for high-frequency evaluation.
//!
//! A [`ScratchPool`] keeps released buffers, keyed by element type, and hands
//! them back out on request.  [`Scratch`] is the guard for a buffer in use; it
//! goes back to its pool when dropped, on every exit path.
//!
//! The pool is not synchronized.  Give each thread its own, either explicitly
//! or through [`with_local_pool`].  Clearing a pool only costs allocations;
//! evaluation results never depend on its contents.

use crate::{Real, Basis, BasisError};

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::{fmt, mem};

#[derive(Default)]
pub struct ScratchPool {
    // each entry holds Vec<T> for the T of its key
    free: RefCell<HashMap<TypeId, Vec<Box<dyn Any + Send>>>>,
}

impl fmt::Debug for ScratchPool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let free = self.free.borrow();
        let counts: Vec<_> = free.values().map(|bufs| bufs.len()).collect();
        f.debug_struct("ScratchPool").field("free", &counts).finish()
    }
}

impl ScratchPool {
    pub fn new() -> Self { Self::default() }

    /// Get a zero-filled buffer of length `len`, reusing a free one if possible.
    ///
    /// Among the free buffers of the right type, the smallest one with enough
    /// capacity is taken.
    pub fn acquire<T: Real>(&self, len: usize) -> Scratch<'_, T> {
        let recycled = {
            let mut free = self.free.borrow_mut();
            free.get_mut(&TypeId::of::<T>()).and_then(|bufs| take_best_fit::<T>(bufs, len))
        };

        let mut buf = recycled.unwrap_or_else(|| Vec::with_capacity(len));
        buf.clear();
        buf.resize(len, T::zero());
        Scratch { pool: self, buf }
    }

    /// Return a buffer to the pool.  Buffers without capacity are discarded.
    pub fn release<T: Real>(&self, buf: Vec<T>) {
        if buf.capacity() == 0 {
            return;
        }
        self.free.borrow_mut()
            .entry(TypeId::of::<T>())
            .or_insert_with(Vec::new)
            .push(Box::new(buf));
    }

    /// Number of free buffers of element type `T`.
    pub fn num_free<T: Real>(&self) -> usize {
        self.free.borrow().get(&TypeId::of::<T>()).map_or(0, |bufs| bufs.len())
    }

    /// Drop all free buffers.
    pub fn clear(&self) { self.free.borrow_mut().clear(); }
}

fn take_best_fit<T: Real>(bufs: &mut Vec<Box<dyn Any + Send>>, len: usize) -> Option<Vec<T>> {
    let index = {
        bufs.iter()
            .map(|b| b.downcast_ref::<Vec<T>>().map_or(0, Vec::capacity))
            .enumerate()
            .filter(|&(_, cap)| cap >= len)
            .min_by_key(|&(_, cap)| cap)
            .map(|(i, _)| i)?
    };
    bufs.swap_remove(index).downcast::<Vec<T>>().ok().map(|b| *b)
}

/// A buffer on loan from a [`ScratchPool`].
///
/// Derefs to a slice of the requested length.
pub struct Scratch<'p, T: Real> {
    pool: &'p ScratchPool,
    buf: Vec<T>,
}

impl<'p, T: Real> Scratch<'p, T> {
    /// Keep the buffer instead of returning it to the pool.
    pub fn into_vec(mut self) -> Vec<T> {
        // leaves an empty vec behind, which release() discards
        mem::replace(&mut self.buf, Vec::new())
    }
}

impl<'p, T: Real> Drop for Scratch<'p, T> {
    fn drop(&mut self) {
        let buf = mem::replace(&mut self.buf, Vec::new());
        self.pool.release(buf);
    }
}

impl<'p, T: Real> Deref for Scratch<'p, T> {
    type Target = [T];
    fn deref(&self) -> &[T] { &self.buf }
}

impl<'p, T: Real> DerefMut for Scratch<'p, T> {
    fn deref_mut(&mut self) -> &mut [T] { &mut self.buf }
}

impl<'p, T: Real> fmt::Debug for Scratch<'p, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Debug::fmt(&self.buf[..], f) }
}

thread_local! {
    static LOCAL_POOL: ScratchPool = ScratchPool::new();
}

/// Run a closure with this thread's own pool.
///
/// Buffers acquired inside cannot escape the closure except through
/// `Scratch::into_vec`.
pub fn with_local_pool<R>(f: impl FnOnce(&ScratchPool) -> R) -> R {
    LOCAL_POOL.with(f)
}

/// Pooled entry points.
///
/// The returned guards hold the requested prefix and return their storage to
/// `pool` when dropped, including when validation fails.
impl<T: Real> Basis<T> {
    pub fn evaluate_pooled<'p>(
        &self,
        pool: &'p ScratchPool,
        t: T,
        maxn: Option<usize>,
    ) -> Result<Scratch<'p, T>, BasisError> {
        let maxn = self.check_prefix(maxn)?;
        let mut out = pool.acquire(maxn);
        self.evaluate_into(t, Some(maxn), &mut out)?;
        Ok(out)
    }

    pub fn evaluate_d_pooled<'p>(
        &self,
        pool: &'p ScratchPool,
        t: T,
        maxn: Option<usize>,
    ) -> Result<Scratch<'p, T>, BasisError> {
        let maxn = self.check_prefix(maxn)?;
        let mut out_d = pool.acquire(maxn);
        self.evaluate_d_into(t, Some(maxn), &mut out_d)?;
        Ok(out_d)
    }

    pub fn evaluate_ed_pooled<'p>(
        &self,
        pool: &'p ScratchPool,
        t: T,
        maxn: Option<usize>,
    ) -> Result<(Scratch<'p, T>, Scratch<'p, T>), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        let mut out = pool.acquire(maxn);
        let mut out_d = pool.acquire(maxn);
        self.evaluate_ed_into(t, Some(maxn), &mut out, &mut out_d)?;
        Ok((out, out_d))
    }

    pub fn forward_rule_pooled<'p>(
        &self,
        pool: &'p ScratchPool,
        t: T,
        dt: T,
        maxn: Option<usize>,
    ) -> Result<(Scratch<'p, T>, Scratch<'p, T>), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        let mut out = pool.acquire(maxn);
        let mut out_d = pool.acquire(maxn);
        self.forward_rule_into(t, dt, Some(maxn), &mut out, &mut out_d)?;
        Ok((out, out_d))
    }
}

#[cfg(test)]
#[deny(unused)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::{discretize, IdentityTransform};

    #[test]
    fn reuse_after_release() {
        let pool = ScratchPool::new();
        let ptr = {
            let mut buf = pool.acquire::<f64>(16);
            buf[3] = 1.0;
            buf.as_ptr()
        };
        assert_eq!(pool.num_free::<f64>(), 1);

        let buf = pool.acquire::<f64>(8);
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|&x| x == 0.0));
        assert_eq!(pool.num_free::<f64>(), 0);
    }

    #[test]
    fn keyed_by_type_and_capacity() {
        let pool = ScratchPool::new();
        drop(pool.acquire::<f32>(4));
        assert_eq!(pool.num_free::<f32>(), 1);
        assert_eq!(pool.num_free::<f64>(), 0);

        // too small to reuse: a new buffer is allocated and the old one stays free
        let big = pool.acquire::<f32>(64);
        assert_eq!(big.len(), 64);
        assert_eq!(pool.num_free::<f32>(), 1);
        drop(big);
        assert_eq!(pool.num_free::<f32>(), 2);

        // best fit picks the small one
        let small = pool.acquire::<f32>(2);
        assert_eq!(pool.num_free::<f32>(), 1);
        let leftover = pool.free.borrow()[&TypeId::of::<f32>()][0]
            .downcast_ref::<Vec<f32>>().unwrap().capacity();
        assert!(leftover >= 64);
        drop(small);
    }

    #[test]
    fn into_vec_detaches() {
        let pool = ScratchPool::new();
        let v = pool.acquire::<f64>(3).into_vec();
        assert_eq!(v, vec![0.0; 3]);
        assert_eq!(pool.num_free::<f64>(), 0);
    }

    #[test]
    fn pooled_matches_allocating() {
        let basis = discretize(6, 2, 1.0, 0, -1.0, 300, &IdentityTransform).unwrap();
        let pool = ScratchPool::new();
        for &t in &[-0.7, 0.0, 0.4] {
            let (out, out_d) = basis.evaluate_ed_pooled(&pool, t, None).unwrap();
            let (P, dP) = basis.evaluate_ed(t);
            assert_eq!(&out[..], &P[..]);
            assert_eq!(&out_d[..], &dP[..]);

            let prefix = basis.evaluate_pooled(&pool, t, Some(2)).unwrap();
            assert_eq!(&prefix[..], &P[..2]);

            let d = basis.evaluate_d_pooled(&pool, t, None).unwrap();
            assert_eq!(&d[..], &dP[..]);

            let (_, fwd_d) = basis.forward_rule_pooled(&pool, t, 2.0, Some(4)).unwrap();
            assert_eq!(fwd_d.len(), 4);
        }
        // nothing leaks: every buffer came back
        assert!(pool.num_free::<f64>() >= 2);
        let free_before = pool.num_free::<f64>();
        drop(basis.evaluate_pooled(&pool, 0.1, None).unwrap());
        assert_eq!(pool.num_free::<f64>(), free_before);
    }

    #[test]
    fn released_on_error() {
        let basis = discretize(4, 0, 1.0, 0, -1.0, 100, &IdentityTransform).unwrap();
        let pool = ScratchPool::new();
        assert!(basis.evaluate_pooled(&pool, 0.0, Some(5)).is_err());
        assert_eq!(pool.num_free::<f64>(), 0);
        drop(basis.evaluate_ed_pooled(&pool, 0.0, None).unwrap());
        assert_eq!(pool.num_free::<f64>(), 2);
        assert!(basis.evaluate_ed_pooled(&pool, 0.0, Some(9)).is_err());
        assert_eq!(pool.num_free::<f64>(), 2);
    }

    #[test]
    fn clearing_does_not_change_results() {
        let basis = discretize(5, 2, 1.0, 2, -1.0, 200, &IdentityTransform).unwrap();
        with_local_pool(|pool| {
            let a = basis.evaluate_pooled(pool, 0.3, None).unwrap().into_vec();
            pool.clear();
            let b = basis.evaluate_pooled(pool, 0.3, None).unwrap();
            assert_eq!(&a[..], &b[..]);
        });
    }
}
