/// A strict weak ordering over the values stored in a tree.
///
/// The ordering is expressed over a lookup key projected out of each value, so a tree can be
/// searched with a key alone. Two values are equivalent when neither key is less than the other.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::{Compare, RedBlackTree};
///
/// // orders strings by length only
/// #[derive(Clone, Default)]
/// struct ByLength;
///
/// impl Compare<String> for ByLength {
///     type Key = str;
///
///     fn key<'a>(&self, value: &'a String) -> &'a str {
///         value.as_str()
///     }
///
///     fn less(&self, lhs: &str, rhs: &str) -> bool {
///         lhs.len() < rhs.len()
///     }
/// }
///
/// let mut tree = RedBlackTree::with_compare(ByLength);
/// tree.insert(String::from("ccc"));
/// tree.insert(String::from("a"));
/// assert!(!tree.insert(String::from("b")).1);
/// assert!(tree.contains("z"));
/// ```
pub trait Compare<T> {
    /// The type lookups are performed with.
    type Key: ?Sized;

    /// Projects the lookup key out of a stored value.
    fn key<'a>(&self, value: &'a T) -> &'a Self::Key;

    /// Returns `true` if `lhs` is ordered strictly before `rhs`.
    fn less(&self, lhs: &Self::Key, rhs: &Self::Key) -> bool;

    /// Returns `true` if neither key is ordered before the other. Trees use this to detect
    /// duplicates on unique insertion and to stop a lookup.
    fn equivalent(&self, lhs: &Self::Key, rhs: &Self::Key) -> bool {
        !self.less(lhs, rhs) && !self.less(rhs, lhs)
    }
}

/// Orders values by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord,
{
    type Key = T;

    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// Orders key-value pairs by key alone. The mapped value never takes part in a comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByKey;

impl<K, V> Compare<(K, V)> for ByKey
where
    K: Ord,
{
    type Key = K;

    fn key<'a>(&self, value: &'a (K, V)) -> &'a K {
        &value.0
    }

    fn less(&self, lhs: &K, rhs: &K) -> bool {
        lhs < rhs
    }
}

/// Orders values with a `less` closure.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::{FnCompare, RedBlackTree};
///
/// let mut tree = RedBlackTree::with_compare(FnCompare(|lhs: &u32, rhs: &u32| lhs > rhs));
/// tree.insert_many(vec![1, 3, 2]);
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
/// ```
#[derive(Clone, Copy)]
pub struct FnCompare<F>(pub F);

impl<T, F> Compare<T> for FnCompare<F>
where
    F: Fn(&T, &T) -> bool,
{
    type Key = T;

    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    fn less(&self, lhs: &T, rhs: &T) -> bool {
        (self.0)(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByKey, Compare, FnCompare, Natural};

    #[test]
    fn test_natural() {
        assert!(Compare::<u32>::less(&Natural, &1, &2));
        assert!(!Compare::<u32>::less(&Natural, &2, &2));
        assert!(Compare::<u32>::equivalent(&Natural, &2, &2));
    }

    #[test]
    fn test_by_key_ignores_value() {
        let lhs = (1, "b");
        let rhs = (1, "a");
        assert_eq!(Compare::<(u32, &str)>::key(&ByKey, &lhs), &1);
        assert!(Compare::<(u32, &str)>::equivalent(
            &ByKey,
            ByKey.key(&lhs),
            ByKey.key(&rhs),
        ));
        assert!(Compare::<(u32, &str)>::less(&ByKey, &0, &1));
    }

    #[test]
    fn test_fn_compare() {
        let compare = FnCompare(|lhs: &i32, rhs: &i32| lhs > rhs);
        assert!(Compare::<i32>::less(&compare, &2, &1));
        assert!(!Compare::<i32>::less(&compare, &1, &2));
        assert!(Compare::<i32>::equivalent(&compare, &3, &3));
    }
}
