// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::story::{Action, Entity, Location, SampleStory, Visuals};

const ALICE_TEXT: &str = "Alice was beginning to get very tired of sitting by her sister on the bank, and of having nothing to do: once or twice she had peeped into the book her sister was reading, but it had no pictures or conversations in it, “and what is the use of a book,” thought Alice “without pictures or conversations?” So she was considering in her own mind (as well as she could, for the hot day made her feel very sleepy and stupid), whether the pleasure of making a daisy-chain would be worth the trouble of getting up and picking the daisies, when suddenly a White Rabbit with pink eyes ran close by her. There was nothing so very remarkable in that; nor did Alice think it so very much out of the way to hear the Rabbit say to itself, “Oh dear! Oh dear! I shall be late!” but when the Rabbit actually took a watch out of its waistcoat-pocket, and looked at it, and then hurried on, Alice started to her feet, for it flashed across her mind that she had never before seen a rabbit with either a waistcoat-pocket, or a watch to take out of it, and burning with curiosity, she ran across the field after it, and fortunately was just in time to see it pop down a large rabbit-hole under the hedge.";

/// The opening of *Alice's Adventures in Wonderland* with matching visuals.
///
/// Every action passage occurs verbatim in the text.
pub fn alice_in_wonderland() -> SampleStory {
    let entities = vec![
        Entity::new("Alice", "👧")
            .with_property("tired", 8)
            .with_property("bored", 7)
            .with_property("curious", 9),
        Entity::new("Sister", "👩").with_property("studious", 7),
        Entity::new("Book", "📖").with_property("uninteresting", 9),
        Entity::new("White Rabbit", "🐇")
            .with_property("anxious", 9)
            .with_property("well-dressed", 8),
    ];

    let locations = vec![
        Location::new("The Bank", "🏞️"),
        Location::new("The Field", "🌾"),
        Location::new("Rabbit-hole", "🕳️"),
    ];

    let actions = vec![
        Action::new(
            "sitting by",
            "Alice",
            "Sister",
            "The Bank",
            "Alice was beginning to get very tired of sitting by her sister on the bank, and of having nothing to do",
        ),
        Action::new(
            "peeped into",
            "Alice",
            "Book",
            "The Bank",
            "once or twice she had peeped into the book her sister was reading",
        ),
        Action::new(
            "ran close by",
            "White Rabbit",
            "Alice",
            "The Bank",
            "when suddenly a White Rabbit with pink eyes ran close by her.",
        ),
        Action::new(
            "ran after",
            "Alice",
            "White Rabbit",
            "The Field",
            "burning with curiosity, she ran across the field after it",
        ),
        Action::new(
            "pop down",
            "White Rabbit",
            "Rabbit-hole",
            "The Field",
            "and fortunately was just in time to see it pop down a large rabbit-hole under the hedge.",
        ),
    ];

    SampleStory { text: ALICE_TEXT.to_owned(), visuals: Visuals { entities, locations, actions } }
}
