use rand::Rng;

use super::card::Card;
use super::shuffle::shuffled;
use crate::photos::ImageDescriptor;

pub const MESSAGE_WIN: &str = "You win!";
pub const MESSAGE_FOUND_PAIR: &str = "Yay, good job!";
pub const MESSAGE_MISSED_PAIR: &str = "Bummer... Try again.";
pub const MESSAGE_PICK: &str = "Pick another card!";

/// Result of one selection, for callers that want to react to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Ignored,
    Pending,
    Turn { found_pair: bool },
}

/// One round of the pairs game over a fixed set of photos.
///
/// At most one card is pending at a time. A turn is two distinct
/// selections; only completed turns count towards `clicks`.
#[derive(Clone, Debug)]
pub struct Game {
    images: Vec<ImageDescriptor>,
    cards: Vec<Card>,
    pending: Option<u32>,
    clicks: u32,
    found_pair: Option<bool>,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(images: Vec<ImageDescriptor>, rng: &mut R) -> Self {
        let cards = Self::deal(&images, rng);
        Game {
            images,
            cards,
            pending: None,
            clicks: 0,
            found_pair: None,
        }
    }

    /// Every image twice, shuffled, numbered from 1.
    pub fn deal<R: Rng + ?Sized>(images: &[ImageDescriptor], rng: &mut R) -> Vec<Card> {
        let doubled: Vec<ImageDescriptor> = images
            .iter()
            .flat_map(|image| [image.clone(), image.clone()])
            .collect();
        shuffled(&doubled, rng)
            .into_iter()
            .zip(1u32..)
            .map(|(image, id)| Card::new(id, image))
            .collect()
    }

    /// Deals again from the same photos.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = Self::deal(&self.images, rng);
        self.pending = None;
        self.clicks = 0;
        self.found_pair = None;
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn pending(&self) -> Option<&Card> {
        self.pending.and_then(|id| self.card(id))
    }

    /// 1-based position of the card's photo in [`Game::images`].
    ///
    /// Both cards of a pair share the number.
    pub fn photo_number(&self, card: &Card) -> Option<usize> {
        self.images
            .iter()
            .position(|image| image.same_photo(&card.image))
            .map(|index| index + 1)
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn found_pair(&self) -> Option<bool> {
        self.found_pair
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn select(&mut self, id: u32) -> Selection {
        let Some(index) = self.index_of(id) else {
            return Selection::Ignored;
        };
        let card = &self.cards[index];
        if card.matched || (self.pending.is_some() && card.flipped) {
            return Selection::Ignored;
        }

        match self.pending.and_then(|pending| self.index_of(pending)) {
            None => {
                // A new first pick turns any leftover mismatch face down.
                for card in &mut self.cards {
                    card.flipped = card.matched || card.id == id;
                }
                self.pending = Some(id);
                self.found_pair = None;
                Selection::Pending
            }
            Some(pending_index) => {
                let found_pair = self.cards[index].pairs_with(&self.cards[pending_index]);
                for i in [index, pending_index] {
                    self.cards[i].flipped = true;
                    self.cards[i].matched = found_pair;
                }
                self.found_pair = Some(found_pair);
                self.pending = None;
                self.clicks += 1;
                Selection::Turn { found_pair }
            }
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.cards.iter().all(|card| card.matched)
    }

    pub fn message(&self) -> &'static str {
        if self.is_game_over() {
            MESSAGE_WIN
        } else {
            match self.found_pair {
                Some(true) => MESSAGE_FOUND_PAIR,
                Some(false) => MESSAGE_MISSED_PAIR,
                None => MESSAGE_PICK,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::card::CardFace;
    use crate::photos::{ImageFormat, PAIR_COUNT, fallback_images};

    fn images(tag: &str) -> Vec<ImageDescriptor> {
        (0..PAIR_COUNT)
            .map(|i| ImageDescriptor {
                url: format!("https://images.example/{tag}/{i}.jpg"),
                format: if i % 2 == 0 {
                    ImageFormat::Landscape
                } else {
                    ImageFormat::Portrait
                },
                attribution: None,
            })
            .collect()
    }

    fn new_game(seed: u64) -> Game {
        Game::new(images("t"), &mut StdRng::seed_from_u64(seed))
    }

    fn pair_ids(game: &Game) -> Vec<(u32, u32)> {
        let mut by_url: HashMap<&str, Vec<u32>> = HashMap::new();
        for card in game.cards() {
            by_url.entry(card.image.url.as_str()).or_default().push(card.id);
        }
        let mut pairs: Vec<(u32, u32)> = by_url.values().map(|ids| (ids[0], ids[1])).collect();
        pairs.sort_unstable();
        pairs
    }

    fn mismatched_ids(game: &Game) -> (u32, u32) {
        let pairs = pair_ids(game);
        (pairs[0].0, pairs[1].0)
    }

    #[test]
    fn fresh_deal_is_hidden_and_numbered() {
        let game = new_game(1);
        assert_eq!(game.cards().len(), 2 * PAIR_COUNT);
        let ids: HashSet<u32> = game.cards().iter().map(|card| card.id).collect();
        assert_eq!(ids, (1..=16).collect());
        assert!(game.cards().iter().all(|card| card.face() == CardFace::Back));
        assert_eq!(game.clicks(), 0);
        assert_eq!(game.found_pair(), None);
        assert!(game.pending().is_none());
        assert_eq!(game.message(), MESSAGE_PICK);
        assert!(!game.is_game_over());
    }

    #[test]
    fn first_pick_is_pending_and_not_counted() {
        let mut game = new_game(2);
        assert_eq!(game.select(5), Selection::Pending);
        assert_eq!(game.pending().map(|card| card.id), Some(5));
        assert_eq!(game.card(5).map(Card::face), Some(CardFace::Front));
        assert_eq!(game.clicks(), 0);
    }

    #[test]
    fn matching_pair_is_marked_and_counted() {
        let mut game = new_game(3);
        let (a, b) = pair_ids(&game)[0];
        game.select(a);
        assert_eq!(game.select(b), Selection::Turn { found_pair: true });

        for id in [a, b] {
            let card = game.card(id).unwrap();
            assert!(card.matched && card.flipped);
        }
        assert_eq!(game.found_pair(), Some(true));
        assert_eq!(game.clicks(), 1);
        assert!(game.pending().is_none());
        assert_eq!(game.message(), MESSAGE_FOUND_PAIR);
    }

    #[test]
    fn mismatch_stays_revealed_unmatched() {
        let mut game = new_game(4);
        let (a, b) = mismatched_ids(&game);
        game.select(a);
        assert_eq!(game.select(b), Selection::Turn { found_pair: false });

        for id in [a, b] {
            let card = game.card(id).unwrap();
            assert!(card.flipped);
            assert!(!card.matched);
        }
        assert_eq!(game.found_pair(), Some(false));
        assert_eq!(game.clicks(), 1);
        assert!(game.pending().is_none());
        assert_eq!(game.message(), MESSAGE_MISSED_PAIR);
    }

    #[test]
    fn next_first_pick_hides_the_mismatch() {
        let mut game = new_game(5);
        let (a, b) = mismatched_ids(&game);
        let (matched_a, matched_b) = pair_ids(&game)[2];
        game.select(matched_a);
        game.select(matched_b);
        game.select(a);
        game.select(b);

        let third = pair_ids(&game)[3].0;
        assert_eq!(game.select(third), Selection::Pending);
        assert!(!game.card(a).unwrap().flipped);
        assert!(!game.card(b).unwrap().flipped);
        assert!(game.card(matched_a).unwrap().flipped);
        assert_eq!(game.found_pair(), None);
        assert_eq!(game.message(), MESSAGE_PICK);
    }

    #[test]
    fn a_revealed_mismatch_can_be_picked_again() {
        let mut game = new_game(6);
        let (a, b) = mismatched_ids(&game);
        game.select(a);
        game.select(b);

        assert_eq!(game.select(a), Selection::Pending);
        assert!(game.card(a).unwrap().flipped);
        assert!(!game.card(b).unwrap().flipped);
    }

    #[test]
    fn same_card_twice_changes_nothing() {
        let mut game = new_game(7);
        game.select(3);
        let before = game.cards().to_vec();
        assert_eq!(game.select(3), Selection::Ignored);
        assert_eq!(game.cards(), before.as_slice());
        assert_eq!(game.clicks(), 0);
        assert_eq!(game.pending().map(|card| card.id), Some(3));
    }

    #[test]
    fn matched_cards_are_ignored() {
        let mut game = new_game(8);
        let (a, b) = pair_ids(&game)[0];
        game.select(a);
        game.select(b);
        assert_eq!(game.select(a), Selection::Ignored);
        assert!(game.pending().is_none());
        assert_eq!(game.clicks(), 1);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut game = new_game(9);
        assert_eq!(game.select(0), Selection::Ignored);
        assert_eq!(game.select(17), Selection::Ignored);
        assert!(game.pending().is_none());
    }

    #[test]
    fn matching_every_pair_wins() {
        let mut game = new_game(10);
        for (a, b) in pair_ids(&game) {
            game.select(a);
            game.select(b);
        }
        assert!(game.is_game_over());
        assert_eq!(game.message(), MESSAGE_WIN);
        assert_eq!(game.clicks(), PAIR_COUNT as u32);
    }

    #[test]
    fn restart_deals_the_same_photos_face_down() {
        let mut game = new_game(11);
        let (a, b) = pair_ids(&game)[0];
        game.select(a);
        game.select(b);
        game.select(pair_ids(&game)[1].0);

        game.restart(&mut StdRng::seed_from_u64(12));
        assert_eq!(game.clicks(), 0);
        assert_eq!(game.found_pair(), None);
        assert!(game.pending().is_none());
        assert!(game.cards().iter().all(|card| !card.flipped && !card.matched));

        let urls: HashSet<&str> = game.cards().iter().map(|card| card.image.url.as_str()).collect();
        let expected: HashSet<&str> = game.images().iter().map(|image| image.url.as_str()).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn fallback_set_deals_a_full_board() {
        let game = Game::new(fallback_images(), &mut StdRng::seed_from_u64(13));
        assert_eq!(pair_ids(&game).len(), PAIR_COUNT);
    }

    #[test]
    fn photo_numbers_follow_the_image_list() {
        let game = new_game(14);
        let pairs = pair_ids(&game);
        let mut numbers = HashSet::new();
        for (a, b) in pairs {
            let first = game.photo_number(game.card(a).unwrap()).unwrap();
            let second = game.photo_number(game.card(b).unwrap()).unwrap();
            assert_eq!(first, second);
            assert_eq!(game.images()[first - 1].url, game.card(a).unwrap().image.url);
            numbers.insert(first);
        }
        assert_eq!(numbers, (1..=PAIR_COUNT).collect());
    }

    #[test]
    fn foreign_card_has_no_photo_number() {
        let game = new_game(15);
        let stranger = Card::new(99, images("other")[0].clone());
        assert_eq!(game.photo_number(&stranger), None);
    }

    proptest! {
        #[test]
        fn deal_has_each_image_twice(seed in any::<u64>()) {
            let game = new_game(seed);
            prop_assert_eq!(game.cards().len(), 16);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for card in game.cards() {
                *counts.entry(card.image.url.as_str()).or_default() += 1;
            }
            prop_assert_eq!(counts.len(), PAIR_COUNT);
            prop_assert!(counts.values().all(|&count| count == 2));

            let mut ids: Vec<u32> = game.cards().iter().map(|card| card.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (1..=16).collect::<Vec<u32>>());
        }

        #[test]
        fn any_click_sequence_keeps_invariants(
            seed in any::<u64>(),
            clicks in prop::collection::vec(0u32..=17, 0..120),
        ) {
            let mut game = new_game(seed);
            let mut turns = 0u32;
            for id in clicks {
                if let Selection::Turn { .. } = game.select(id) {
                    turns += 1;
                }
                prop_assert_eq!(game.clicks(), turns);
                prop_assert!(game.cards().iter().all(|card| !card.matched || card.flipped));
                let revealed_unmatched = game
                    .cards()
                    .iter()
                    .filter(|card| card.flipped && !card.matched)
                    .count();
                if game.pending().is_some() {
                    prop_assert_eq!(revealed_unmatched, 1);
                } else {
                    prop_assert!(revealed_unmatched == 0 || revealed_unmatched == 2);
                }
                let matched = game.cards().iter().filter(|card| card.matched).count();
                prop_assert_eq!(matched % 2, 0);
            }
        }
    }
}
