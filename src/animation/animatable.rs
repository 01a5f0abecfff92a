/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(<f32 as Animatable>::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(<f32 as Animatable>::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(<f32 as Animatable>::lerp(&4.0, &-4.0, 1.0), -4.0);
    }
}
