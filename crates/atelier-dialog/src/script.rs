// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed qualification script.
//!
//! A closed, ordered sequence of prompts indexed by
//! `Conversation::current_question`. Not configurable per conversation.

/// The five qualification questions, asked one at a time.
pub const QUALIFY_QUESTIONS: [&str; 5] = [
    "Какой тип мебели вас интересует? (кухня, шкаф, диван и т.д.)",
    "В каком стиле вы предпочитаете? (модерн, классика, минимализм)",
    "Какой у вас бюджет примерно?",
    "Нужна ли помощь с дизайном?",
    "В каком городе планируете заказ?",
];

/// Sent once when a conversation is first created.
pub const GREETING_MESSAGE: &str = "👋 Здравствуйте! \n\n\
Я помогаю с вопросами по дизайну и мебели на заказ.\n\n\
Расскажите, что вас интересует?";

/// Sent when the script is exhausted and contact collection begins.
pub const CONTACT_MESSAGE: &str = "📞 Отлично! \n\n\
Чтобы мы могли связаться с вами, укажите, пожалуйста:\n\
• Ваше имя\n\
• Номер телефона\n\n\
Или отправьте контакт через кнопку \"Поделиться контактом\" в Telegram.";

/// Sent once phone and name are both collected.
pub const HANDOVER_MESSAGE: &str = "✅ Спасибо за информацию!\n\n\
Я передал вашу заявку владельцу. Скоро с вами свяжутся.\n\n\
Если есть срочные вопросы, можете написать напрямую.";

/// Acknowledgement for a photo-only first contact; carries question 0 so the
/// script still starts in the same call.
pub fn photo_opening() -> String {
    format!("Спасибо за фото! {}", QUALIFY_QUESTIONS[0])
}

/// Storage key for the answer to question `index`.
pub fn answer_key(index: usize) -> String {
    format!("question_{index}")
}

/// Re-prompt listing whichever of phone/name is still missing.
pub fn missing_contact_prompt(phone_missing: bool, name_missing: bool) -> String {
    let mut missing = Vec::new();
    if phone_missing {
        missing.push("телефон");
    }
    if name_missing {
        missing.push("имя");
    }
    format!("Пожалуйста, укажите {}.", missing.join(" и "))
}
