/// Découpe une ligne de commande configurée en tokens, en respectant les quotes.
///
/// En dehors des quotes, les blancs séparent les tokens et sont écartés. Une
/// quote simple ou double ouvre une région littérale fermée par la même quote,
/// quotes exclues du token. Une quote non terminée consomme la fin de l'entrée
/// dans le token courant, sans erreur: la fonction est totale.
pub fn split_command_line(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in raw.trim().chars() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            } else {
                current.push(ch);
            }
            continue;
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
            continue;
        }
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
