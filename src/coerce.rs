/// Conversion of an arbitrary scalar into a floating point p-value or belief score
///
/// Anything that cannot be read as a number becomes `f64::NAN`.
pub trait Numberfy {
    fn numberfy(&self) -> f64;
}

macro_rules! impl_numberfy {
    ($($t:ty),*) => {
        $(
            impl Numberfy for $t {
                fn numberfy(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numberfy!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Numberfy for str {
    fn numberfy(&self) -> f64 {
        self.trim().parse::<f64>().unwrap_or(f64::NAN)
    }
}

impl Numberfy for String {
    fn numberfy(&self) -> f64 {
        self.as_str().numberfy()
    }
}

impl<T: Numberfy> Numberfy for Option<T> {
    fn numberfy(&self) -> f64 {
        self.as_ref().map_or(f64::NAN, Numberfy::numberfy)
    }
}

impl<T: Numberfy + ?Sized> Numberfy for &T {
    fn numberfy(&self) -> f64 {
        (**self).numberfy()
    }
}

/// Returns `x` as a float, or NaN if it is not a number
pub fn numberfy<T: Numberfy + ?Sized>(x: &T) -> f64 {
    x.numberfy()
}

/// Whether a coerced value can stand as a p-value or belief score
pub fn is_valid(x: f64) -> bool {
    x >= 0.0
}
