use std::env;
use std::process::exit;

use console::Style;
use npdiff::text::{ChangeTag, TextDiff};
use npdiff::DiffTag;

fn print_run(tag: ChangeTag, value: &str) {
    if value.is_empty() {
        return;
    }
    let style = match tag {
        ChangeTag::Delete => Style::new().red(),
        ChangeTag::Insert => Style::new().green(),
        ChangeTag::Equal => Style::new(),
    };
    println!("{}{}", style.apply_to(tag).bold(), style.apply_to(value));
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <str1> <str2>", args[0]);
        exit(1);
    }

    let diff = TextDiff::from_chars(&args[1], &args[2]);
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let old = diff.old_slices()[old_range].concat();
        let new = diff.new_slices()[new_range].concat();
        if tag == DiffTag::Equal {
            print_run(ChangeTag::Equal, &old);
        } else {
            print_run(ChangeTag::Delete, &old);
            print_run(ChangeTag::Insert, &new);
        }
    }
}
