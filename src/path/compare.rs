//! Tree-entry ordering.
//! A directory name sorts as if it carried a trailing `/`, so `a.txt` < `a/` < `a0`.

use std::cmp::Ordering;

pub fn compare_entries<A, B>(a: &A, a_is_dir: bool, b: &B, b_is_dir: bool) -> Ordering
where
    A: AsRef<[u8]> + ?Sized,
    B: AsRef<[u8]> + ?Sized,
{
    let ka = a.as_ref().iter().copied().chain(a_is_dir.then_some(b'/'));
    let kb = b.as_ref().iter().copied().chain(b_is_dir.then_some(b'/'));
    ka.cmp(kb)
}
