/// Title-cases free text: the first letter of every alphabetic run is upper-cased
/// and the rest of the run lower-cased. Anything that is not a letter starts a new run,
/// so `"credit_card"` becomes `"Credit_Card"` and `"new york"` becomes `"New York"`.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut in_word = false;

    for character in value.chars() {
        if character.is_alphabetic() {
            if in_word {
                output.extend(character.to_lowercase());
            } else {
                output.extend(character.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(character);
            in_word = false;
        }
    }

    output
}
