//! Conversation assembly.
//!
//! System instructions always come first, then the user turn. For grounded
//! answers the retrieved knowledge is written into the system instructions
//! before the loop starts; nothing is injected mid-loop.

use ragent_core::message::{Conversation, Message};

/// System instructions followed by the user turn.
pub fn build(system_instructions: &str, user_message: &str) -> Conversation {
    Conversation::from_messages([Message::system(system_instructions), Message::user(user_message)])
}

/// Instructions with a knowledge section appended.
pub fn grounded_instructions(instructions: &str, knowledge: &str) -> String {
    format!(
        "# Here are the instructions for the agent:\n{instructions}\n\n# Knowledge base:\n{knowledge}"
    )
}

/// Like [`build`], with `knowledge` embedded in the system instructions.
pub fn build_grounded(instructions: &str, knowledge: &str, user_message: &str) -> Conversation {
    build(&grounded_instructions(instructions, knowledge), user_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragent_core::message::Role;

    #[test]
    fn system_precedes_user() {
        let conv = build("Be kind", "Hi");
        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(conv.messages()[1].content, "Hi");
    }

    #[test]
    fn knowledge_lives_in_system_message() {
        let conv = build_grounded("Answer from the knowledge base", "Gym: 500 USD\n", "Gym limit?");
        let system = &conv.messages()[0];
        assert_eq!(system.role, Role::System);
        assert_eq!(
            system.content,
            "# Here are the instructions for the agent:\nAnswer from the knowledge base\n\n# Knowledge base:\nGym: 500 USD\n"
        );
        assert_eq!(conv.messages()[1].content, "Gym limit?");
    }
}
