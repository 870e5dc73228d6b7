use std::io::{self, BufRead};

// a line may hold several words separated by spaces or hyphens
fn map_words<F>(s: &str, seps: &[char], mut f: F) -> String where F: FnMut(&str) -> String {
    let mut ret = String::new();
    let mut rest = s;
    while let Some(i) = rest.find(seps) {
        if i > 0 { ret.push_str(&f(&rest[..i])); }
        let j = i + rest[i..].chars().next().map_or(1, |c| c.len_utf8());
        ret.push_str(&rest[i..j]);
        rest = &rest[j..];
    }
    if !rest.is_empty() { ret.push_str(&f(rest)); }
    ret
}

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines().map_while(Result::ok) {
        let mut line = line.trim();

        // if the line contains -->, drop that and following
        if let Some(sep) = line.find("-->") {
            line = line[..sep].trim_end();
        }

        // if the line looks like a word-expected pair, process that
        if let Some((word, expected)) = line.split_once('/') {
            let word = word.trim_end();
            let expected = expected.trim_start();
            let evolved = map_words(word, &[' ', '-'], |w| {
                phonorule_toy::evolve(w).unwrap_or_else(|err| format!("<{}>", err))
            });
            println!("{} / {} --> {}", word, expected, evolved);
        }
    }
}
