//! A minimal `Vector128<T>` value type.
use std::{fmt, marker::PhantomData};

mod sealed {
    pub trait Sealed {}
}

/// Lane types a [`Vector128`] can be viewed as.
pub trait Element: sealed::Sealed + Copy + fmt::Display + fmt::Debug + PartialEq {
    const BITS: u32;
    fn to_lane_bits(self) -> u128;
    fn from_lane_bits(bits: u128) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Element for $ty {
                const BITS: u32 = <$ty>::BITS;
                fn to_lane_bits(self) -> u128 {
                    (self as $unsigned) as u128
                }
                fn from_lane_bits(bits: u128) -> Self {
                    bits as $unsigned as $ty
                }
            }
        )*
    };
}

impl_element! {
    i8 => u8, u8 => u8,
    i16 => u16, u16 => u16,
    i32 => u32, u32 => u32,
    i64 => u64, u64 => u64,
}

/// 128 bits interpreted as `128 / T::BITS` lanes of `T`; lane 0 occupies the
/// least significant bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector128<T> {
    bits: u128,
    _lanes: PhantomData<T>,
}

impl<T: Element> Vector128<T> {
    pub const fn from_bits(bits: u128) -> Self {
        Vector128 {
            bits,
            _lanes: PhantomData,
        }
    }

    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    pub const fn lane_count() -> usize {
        (128 / T::BITS) as usize
    }

    /// Builds a vector from exactly [`Self::lane_count`] lanes.
    pub fn from_lanes(lanes: &[T]) -> Option<Self> {
        if lanes.len() != Self::lane_count() {
            return None;
        }
        let bits = lanes
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, lane)| {
                acc | (lane.to_lane_bits() << (i as u32 * T::BITS))
            });
        Some(Self::from_bits(bits))
    }

    pub fn get_element(self, index: usize) -> Option<T> {
        (index < Self::lane_count()).then(|| {
            let mask = u128::MAX >> (128 - T::BITS);
            T::from_lane_bits((self.bits >> (index as u32 * T::BITS)) & mask)
        })
    }

    pub fn lanes(self) -> impl Iterator<Item = T> {
        (0..Self::lane_count()).filter_map(move |i| self.get_element(i))
    }
}

impl Vector128<i64> {
    /// `Vector128.Create(e0, e1)`; the only element type the intrinsics take.
    pub const fn create(e0: i64, e1: i64) -> Self {
        Self::from_bits((e0 as u64 as u128) | ((e1 as u64 as u128) << 64))
    }
}

impl<T: Element> fmt::Display for Vector128<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for (i, lane) in self.lanes().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lane}")?;
        }
        f.write_str(">")
    }
}

impl<T: Element> fmt::Debug for Vector128<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lanes()).finish()
    }
}
