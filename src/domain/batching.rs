/// Split `items` into consecutive batches of at most `batch_size`, preserving order.
///
/// A `batch_size` of zero is treated as one.
pub fn partition<T>(items: &[T], batch_size: usize) -> Vec<&[T]> {
    items.chunks(batch_size.max(1)).collect()
}
