use super::model::{Action, MessageId, RoomId, World};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // The adventure starts on the road
    if !world.rooms.contains_key(&RoomId(1)) {
        errors.push(ValidationError::new("world has no room 1 to start in"));
    }

    let has_message = |id: MessageId| world.messages.contains_key(&id);

    // Validate travel tables
    for (room_id, room) in &world.rooms {
        for (i, entry) in room.travel_table.iter().enumerate() {
            match entry.action {
                Action::GoToRoom(target) if !world.rooms.contains_key(&target) => {
                    errors.push(ValidationError::new(format!(
                        "room {} move {} targets missing room {}",
                        room_id.0, i, target.0
                    )));
                }
                Action::PrintMessage(msg) if !has_message(msg) => {
                    errors.push(ValidationError::new(format!(
                        "room {} move {} prints missing message {}",
                        room_id.0, i, msg.0
                    )));
                }
                Action::SpecialCode(code) if !(301..=303).contains(&code) => {
                    errors.push(ValidationError::new(format!(
                        "room {} move {} uses unknown special code {}",
                        room_id.0, i, code
                    )));
                }
                _ => {}
            }

            if let Some(object) = entry.condition.object() {
                if !world.objects.contains_key(&object) {
                    errors.push(ValidationError::new(format!(
                        "room {} move {} tests missing object {}",
                        room_id.0, i, object.0
                    )));
                }
            }
        }
    }

    // Validate hints; id 0 means "no message" for the unprompted hints
    for (hint_id, hint) in &world.hints {
        if hint.turns_needed == 0 {
            errors.push(ValidationError::new(format!(
                "hint {} has qualifying rooms but no definition",
                hint_id.0
            )));
        }
        for msg in [hint.question, hint.answer] {
            if msg.0 != 0 && !has_message(msg) {
                errors.push(ValidationError::new(format!(
                    "hint {} references missing message {}",
                    hint_id.0, msg.0
                )));
            }
        }
    }

    // Validate verb default messages
    for class in world.vocabulary.classes() {
        let Some(msg) = class.default_message else {
            continue;
        };
        if !has_message(msg) {
            errors.push(ValidationError::new(format!(
                "word '{}' has missing default message {}",
                class.synonyms.first().map(String::as_str).unwrap_or("?"),
                msg.0
            )));
        }
    }

    // Class messages are scanned in ascending order
    for pair in world.class_messages.windows(2) {
        if pair[0].threshold > pair[1].threshold {
            errors.push(ValidationError::new(format!(
                "class message thresholds out of order: {} before {}",
                pair[0].threshold, pair[1].threshold
            )));
        }
    }

    errors
}
