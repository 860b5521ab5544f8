use futures::{Stream, StreamExt, stream, stream::BoxStream};

use crate::{error::BlockStreamError, types::primitives::BlockNumber};

pub type BlockStreamItem = Result<BlockNumber, BlockStreamError>;

pub trait BlockStream: Stream<Item = BlockStreamItem> + Send + Unpin {}

impl<T> BlockStream for T where T: Stream<Item = BlockStreamItem> + Send + Unpin {}

pub type BoxBlockStream = BoxStream<'static, BlockStreamItem>;

/// Yields every block height in `from..=to`.
#[derive(Debug, Clone, Copy)]
pub struct BlockProducer {
    from: BlockNumber,
    to: BlockNumber,
}

impl BlockProducer {
    pub fn new(from: BlockNumber, to: BlockNumber) -> Self {
        Self { from, to }
    }

    pub fn into_stream(self) -> BoxBlockStream {
        stream::iter(self.from.as_u64()..=self.to.as_u64())
            .map(|height| Ok(BlockNumber::new(height)))
            .boxed()
    }

    /// A stream over explicit heights, for sparse or replayed block sequences.
    pub fn heights(heights: impl IntoIterator<Item = BlockNumber>) -> BoxBlockStream {
        let heights: Vec<BlockNumber> = heights.into_iter().collect();
        stream::iter(heights.into_iter().map(Ok)).boxed()
    }
}
