use core::cmp::Ordering;

/// Paint position of an instruction inside its partition.
///
/// `z` is the coarse layer: lower values are drawn first (further back).
/// `pass` orders draws that share the same `z`, e.g. a widget's background,
/// border, content and overlay. It replaces nudging `z` by tiny epsilons.
///
/// `From<f32>` yields `pass = 0`, so plain float layers work everywhere a
/// `Layer` is accepted.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Layer {
    pub z: f32,
    pub pass: u16,
}

impl Layer {
    #[inline]
    pub const fn new(z: f32) -> Self {
        Self { z, pass: 0 }
    }

    #[inline]
    pub const fn with_pass(self, pass: u16) -> Self {
        Self { z: self.z, pass }
    }
}

impl From<f32> for Layer {
    #[inline]
    fn from(z: f32) -> Self {
        Layer::new(z)
    }
}

/// Total sort key of an enqueued instruction.
///
/// Ordering rules:
/// 1) `layer.z`: ascending, compared with `f32::total_cmp`
/// 2) `layer.pass`: ascending
/// 3) `order`: ascending (enqueue order)
#[derive(Debug, Copy, Clone)]
pub struct SortKey {
    pub layer: Layer,
    /// Queue-wide enqueue counter, reset every flush.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(layer: Layer, order: u32) -> Self {
        Self { layer, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .z
            .total_cmp(&other.layer.z)
            .then(self.layer.pass.cmp(&other.layer.pass))
            .then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(z: f32, pass: u16, order: u32) -> SortKey {
        SortKey::new(Layer::new(z).with_pass(pass), order)
    }

    #[test]
    fn z_dominates_pass_and_order() {
        assert!(key(1.0, 9, 0) < key(2.0, 0, 0));
        assert!(key(-1.0, 0, 99) < key(0.0, 0, 0));
    }

    #[test]
    fn pass_breaks_z_ties_before_order() {
        assert!(key(3.0, 0, 10) < key(3.0, 1, 2));
    }

    #[test]
    fn order_breaks_full_ties() {
        assert!(key(3.0, 1, 2) < key(3.0, 1, 3));
    }

    #[test]
    fn float_layer_converts_with_zero_pass() {
        assert_eq!(Layer::from(2.5), Layer { z: 2.5, pass: 0 });
    }
}
