// src/store/seed.rs

//! Initial categories and questions loaded into every store at startup.

use crate::models::{category::QuizCategory, question::Question};

fn category(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    difficulty: &str,
    estimated_time: i32,
    question_count: i32,
) -> QuizCategory {
    QuizCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        difficulty: difficulty.to_string(),
        estimated_time,
        question_count,
    }
}

fn question(
    id: &str,
    category_id: &str,
    text: &str,
    options: [&str; 4],
    correct_answer: i32,
    explanation: &str,
    difficulty: &str,
) -> Question {
    Question {
        id: id.to_string(),
        category_id: category_id.to_string(),
        question_text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: Some(explanation.to_string()),
        difficulty: difficulty.to_string(),
    }
}

pub fn categories() -> Vec<QuizCategory> {
    vec![
        category(
            "science",
            "Science & Nature",
            "Test your knowledge of biology, chemistry, physics, and environmental science.",
            "fas fa-atom",
            "Intermediate",
            20,
            15,
        ),
        category(
            "history",
            "World History",
            "Explore major events, civilizations, and historical figures from around the globe.",
            "fas fa-landmark",
            "Advanced",
            25,
            20,
        ),
        category(
            "technology",
            "Technology & Computing",
            "Challenge yourself with questions about programming, AI, and modern technology.",
            "fas fa-microchip",
            "Expert",
            15,
            12,
        ),
        category(
            "literature",
            "Literature & Arts",
            "Test your knowledge of classic literature, poetry, and artistic movements.",
            "fas fa-book",
            "Intermediate",
            22,
            18,
        ),
        category(
            "geography",
            "Geography & Culture",
            "Explore world geography, countries, capitals, and cultural landmarks.",
            "fas fa-globe",
            "Beginner",
            18,
            16,
        ),
        category(
            "mixed",
            "Mixed Topics",
            "A challenging mix of questions from all categories for the ultimate test.",
            "fas fa-random",
            "All Levels",
            30,
            25,
        ),
    ]
}

pub fn questions() -> Vec<Question> {
    vec![
        question(
            "q1",
            "science",
            "Which planet in our solar system has the most extensive ring system?",
            ["Saturn", "Jupiter", "Uranus", "Neptune"],
            0,
            "Saturn has the most extensive and visible ring system of any planet in our solar system.",
            "Intermediate",
        ),
        question(
            "q2",
            "science",
            "What is the chemical symbol for gold?",
            ["Go", "Gd", "Au", "Ag"],
            2,
            "The chemical symbol for gold is Au, derived from the Latin word 'aurum'.",
            "Beginner",
        ),
        question(
            "q3",
            "science",
            "What is the largest mammal in the world?",
            ["African Elephant", "Blue Whale", "Giraffe", "Polar Bear"],
            1,
            "The blue whale is the largest mammal and the largest animal ever known to have lived on Earth.",
            "Beginner",
        ),
        question(
            "q4",
            "science",
            "Which gas makes up approximately 78% of Earth's atmosphere?",
            ["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
            2,
            "Nitrogen makes up about 78% of Earth's atmosphere, while oxygen makes up about 21%.",
            "Intermediate",
        ),
        question(
            "q5",
            "science",
            "What is the powerhouse of the cell?",
            ["Nucleus", "Mitochondria", "Ribosome", "Cytoplasm"],
            1,
            "Mitochondria are often called the powerhouse of the cell because they produce ATP, the cell's main energy currency.",
            "Beginner",
        ),
        question(
            "h1",
            "history",
            "In which year did World War II end?",
            ["1944", "1945", "1946", "1947"],
            1,
            "World War II ended in 1945 with the surrender of Japan in September.",
            "Beginner",
        ),
        question(
            "h2",
            "history",
            "Who was the first President of the United States?",
            ["Thomas Jefferson", "John Adams", "George Washington", "Benjamin Franklin"],
            2,
            "George Washington was the first President of the United States, serving from 1789 to 1797.",
            "Beginner",
        ),
    ]
}
