/// Asserts that two coefficients, averages or sequences of them are equal up to rounding.
///
/// # Examples
///
/// A single coefficient:
///
/// ```
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(f64, 1. - 6. * 2. / 24., 0.5, ulps = 1);
/// ```
///
/// The coefficients of a batch, where the nesting of both sides has to match:
///
/// ```
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(f64, vec![Some(1.), None, Some(-1.)], [Some(1.), None, Some(-1.)]);
/// ```
///
/// Without `ulps` a difference of `2` ulps is tolerated, without `epsilon` none.
///
/// NaN on both sides at the same index counts as equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($t:ty, $left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, ulps = $ulps:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = $ulps)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = $epsilon, ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr, ulps = $ulps:expr $(,)?) => {{
        let epsilon = $epsilon;
        let ulps = $ulps;
        let left = $left;
        let right = $right;
        let mut left_iter = $crate::ApproxEqIter::indexed_iter_logical_order(&left, Vec::new());
        let mut right_iter = $crate::ApproxEqIter::indexed_iter_logical_order(&right, Vec::new());
        loop {
            match (left_iter.next(), right_iter.next()) {
                (Some((lidx, lv)), Some((ridx, rv))) => {
                    std::assert_eq!(
                        lidx, ridx,
                        "Dimensionality mismatch when iterating in logical order: {:?} != {:?}",
                        lidx, ridx
                    );
                    if !(lv.is_nan() && rv.is_nan()) {
                        std::assert!(
                            $crate::approx_eq!($t, lv, rv, ulps = ulps, epsilon = epsilon),
                            "approximated equal assertion failed (ulps={ulps:?}, epsilon={epsilon:?}) at index {idx:?}: {lv:?} == {rv:?}",
                            ulps=ulps,
                            epsilon=epsilon,
                            lv=lv,
                            rv=rv,
                            idx=lidx,
                        );
                    }
                }
                (Some(pair), None) => {
                    std::panic!("Left input is longer starting with from index {:?}", pair);
                }
                (None, Some(pair)) => {
                    std::panic!("Right input is longer starting with from index {:?}", pair);
                }
                (None, None) => break,
            }
        }
    }};
}

/// Flattens the compared values of [`assert_approx_eq!`] into indexed floats.
///
/// Implemented on references of `f64`, options and sequences of them.
pub trait ApproxEqIter<'a>: Copy {
    type LeafElement;

    /// Yields every float together with its index path below `index_prefix`.
    fn indexed_iter_logical_order(
        self,
        index_prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a>;
}

impl<'a> ApproxEqIter<'a> for &'a f64 {
    type LeafElement = f64;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        Box::new(std::iter::once((prefix, *self)))
    }
}

impl<'a, T> ApproxEqIter<'a> for &'a &'a T
where
    &'a T: ApproxEqIter<'a>,
    T: 'a + ?Sized,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        (*self).indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a Option<T>
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        let iter = self.iter().flat_map(move |el| {
            let mut new_prefix = prefix.clone();
            new_prefix.push(0);
            el.indexed_iter_logical_order(new_prefix)
        });

        Box::new(iter)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a Vec<T>
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        self.as_slice().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T, const N: usize> ApproxEqIter<'a> for &'a [T; N]
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        self.as_ref().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a [T]
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<usize>,
    ) -> Box<dyn Iterator<Item = (Vec<usize>, Self::LeafElement)> + 'a> {
        let iter = self.iter().enumerate().flat_map(move |(idx, el)| {
            let mut new_prefix = prefix.clone();
            new_prefix.push(idx);
            el.indexed_iter_logical_order(new_prefix)
        });

        Box::new(iter)
    }
}
