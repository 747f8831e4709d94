// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_lesson_content(size: usize) -> String {
    let mut content = String::from("Title: Benchmark\nAuthor: bench\nLevel: 3\n\n");
    let problem = "(i) Some **intro** text emoji:smile\n\
                   continued on a second line\n\
                   (?) The ...cat sat on the ...mat, says meta:author\n\
                   (=) right icon:check>big\n\
                   (x) wrong {big}very{big}\n\
                   (&) Because `code` and text:word>giant\n\
                   ___\n\
                   (?) Put these in order 123\n";
    for _ in 0..size {
        content.push_str(problem);
    }
    content
}
