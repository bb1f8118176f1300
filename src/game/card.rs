use crate::photos::ImageDescriptor;

/// What a card shows; the board renders purely from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Back,
    Front,
    Matched,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: u32,
    pub image: ImageDescriptor,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    pub fn new(id: u32, image: ImageDescriptor) -> Self {
        Card {
            id,
            image,
            flipped: false,
            matched: false,
        }
    }

    pub fn face(&self) -> CardFace {
        if self.matched {
            CardFace::Matched
        } else if self.flipped {
            CardFace::Front
        } else {
            CardFace::Back
        }
    }

    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.image.same_photo(&other.image)
    }
}
