/// Domain entities
use super::base::Entity;
use super::value_objects::{BlockBody, BlockId, BlockKind, MoveDirection, PageId};

/// Anything that occupies a zero-based slot in a page's block order
pub trait Positioned {
    fn position(&self) -> usize;

    fn set_position(&mut self, position: usize);
}

/// A ContentBlock is one persisted unit of page content
/// It is owned by exactly one page and has no lifecycle of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    id: BlockId,
    page_id: PageId,
    body: BlockBody,
    position: usize,
}

impl ContentBlock {
    pub fn new(id: BlockId, page_id: PageId, body: BlockBody, position: usize) -> Self {
        ContentBlock {
            id,
            page_id,
            body,
            position,
        }
    }

    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.id
    }

    /// Get the owning page's ID
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn body(&self) -> &BlockBody {
        &self.body
    }

    pub fn kind(&self) -> BlockKind {
        self.body.kind()
    }

    pub fn content(&self) -> &str {
        self.body.content()
    }

    /// Turn the persisted block back into an editable draft
    pub fn to_draft(&self) -> BlockDraft {
        BlockDraft {
            body: self.body.clone(),
            position: self.position,
        }
    }
}

impl Positioned for ContentBlock {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

impl Entity for ContentBlock {
    type Id = BlockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A block being authored, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    body: BlockBody,
    position: usize,
}

impl BlockDraft {
    pub fn new(body: BlockBody, position: usize) -> Self {
        BlockDraft { body, position }
    }

    /// Number a list of bodies in submission order
    pub fn sequence(bodies: impl IntoIterator<Item = BlockBody>) -> Vec<BlockDraft> {
        bodies
            .into_iter()
            .enumerate()
            .map(|(position, body)| BlockDraft { body, position })
            .collect()
    }

    pub fn body(&self) -> &BlockBody {
        &self.body
    }

    pub fn kind(&self) -> BlockKind {
        self.body.kind()
    }

    pub fn into_body(self) -> BlockBody {
        self.body
    }
}

impl Positioned for BlockDraft {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// Sort by position and renumber to the contiguous sequence 0..n-1
pub fn normalize_positions<T: Positioned>(mut blocks: Vec<T>) -> Vec<T> {
    blocks.sort_by_key(|b| b.position());
    for (index, block) in blocks.iter_mut().enumerate() {
        block.set_position(index);
    }
    blocks
}

/// Swap the block at `moved_index` with its neighbour in `direction`.
///
/// Moving the first block up or the last block down leaves the order
/// unchanged. The result is always numbered 0..n-1.
pub fn move_block<T: Positioned>(
    blocks: Vec<T>,
    moved_index: usize,
    direction: MoveDirection,
) -> Vec<T> {
    let mut blocks = normalize_positions(blocks);
    let target = match direction {
        MoveDirection::Up => moved_index.checked_sub(1),
        MoveDirection::Down => Some(moved_index + 1),
    };

    if let Some(target) = target {
        if moved_index < blocks.len() && target < blocks.len() {
            blocks.swap(moved_index, target);
            blocks[moved_index].set_position(moved_index);
            blocks[target].set_position(target);
        }
    }

    blocks
}

/// Remove the block at `target_position` and close the gap it leaves.
///
/// Blocks after the removed one move up by one position. An unknown
/// position removes nothing.
pub fn remove_block<T: Positioned>(blocks: Vec<T>, target_position: usize) -> Vec<T> {
    let mut remaining: Vec<T> = blocks
        .into_iter()
        .filter(|b| b.position() != target_position)
        .collect();

    for block in remaining.iter_mut() {
        if block.position() > target_position {
            block.set_position(block.position() - 1);
        }
    }

    normalize_positions(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(text: &str) -> BlockBody {
        BlockBody::header(text).unwrap()
    }

    fn paragraph(text: &str) -> BlockBody {
        BlockBody::paragraph(text).unwrap()
    }

    fn image(name: &str) -> BlockBody {
        BlockBody::image(name).unwrap()
    }

    fn positions<T: Positioned>(blocks: &[T]) -> Vec<usize> {
        blocks.iter().map(|b| b.position()).collect()
    }

    #[test]
    fn test_sequence_numbers_in_submission_order() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p"), image("image1.jpg")]);

        assert_eq!(positions(&drafts), vec![0, 1, 2]);
        assert_eq!(drafts[0].kind(), BlockKind::Header);
        assert_eq!(drafts[2].kind(), BlockKind::Image);
    }

    #[test]
    fn test_remove_middle_block_closes_gap() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p"), image("image1.jpg")]);

        let result = remove_block(drafts, 1);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].kind(), BlockKind::Header);
        assert_eq!(result[0].position(), 0);
        assert_eq!(result[1].kind(), BlockKind::Image);
        assert_eq!(result[1].position(), 1);
    }

    #[test]
    fn test_remove_unknown_position_keeps_blocks() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p")]);

        let result = remove_block(drafts.clone(), 5);

        assert_eq!(result, drafts);
    }

    #[test]
    fn test_remove_first_and_last() {
        let drafts = BlockDraft::sequence(vec![header("a"), paragraph("b"), paragraph("c")]);

        let without_first = remove_block(drafts.clone(), 0);
        assert_eq!(positions(&without_first), vec![0, 1]);
        assert_eq!(without_first[0].body(), &paragraph("b"));

        let without_last = remove_block(drafts, 2);
        assert_eq!(positions(&without_last), vec![0, 1]);
        assert_eq!(without_last[1].body(), &paragraph("b"));
    }

    #[test]
    fn test_move_block_up_swaps_positions() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p"), image("image3.jpg")]);

        let result = move_block(drafts, 2, MoveDirection::Up);

        assert_eq!(positions(&result), vec![0, 1, 2]);
        assert_eq!(result[1].kind(), BlockKind::Image);
        assert_eq!(result[2].kind(), BlockKind::Paragraph);
    }

    #[test]
    fn test_move_block_down_swaps_positions() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p")]);

        let result = move_block(drafts, 0, MoveDirection::Down);

        assert_eq!(result[0].kind(), BlockKind::Paragraph);
        assert_eq!(result[1].kind(), BlockKind::Header);
        assert_eq!(positions(&result), vec![0, 1]);
    }

    #[test]
    fn test_move_past_edges_is_noop() {
        let drafts = BlockDraft::sequence(vec![header("h"), paragraph("p")]);

        assert_eq!(move_block(drafts.clone(), 0, MoveDirection::Up), drafts);
        assert_eq!(move_block(drafts.clone(), 1, MoveDirection::Down), drafts);
        assert_eq!(move_block(drafts.clone(), 9, MoveDirection::Up), drafts);
    }

    #[test]
    fn test_move_renormalizes_gapped_positions() {
        let drafts = vec![
            BlockDraft::new(header("h"), 0),
            BlockDraft::new(paragraph("p"), 4),
            BlockDraft::new(image("image2.jpg"), 9),
        ];

        let result = move_block(drafts, 1, MoveDirection::Down);

        assert_eq!(positions(&result), vec![0, 1, 2]);
        assert_eq!(result[1].kind(), BlockKind::Image);
        assert_eq!(result[2].kind(), BlockKind::Paragraph);
    }

    #[test]
    fn test_content_block_accessors() {
        let page_id = PageId::new(3).unwrap();
        let block = ContentBlock::new(BlockId::new(10).unwrap(), page_id, paragraph("Body"), 1);

        assert_eq!(block.id().value(), 10);
        assert_eq!(block.page_id(), page_id);
        assert_eq!(block.kind(), BlockKind::Paragraph);
        assert_eq!(block.content(), "Body");
        assert_eq!(block.position(), 1);
        assert_eq!(block.to_draft(), BlockDraft::new(paragraph("Body"), 1));
    }
}
