mod content;
mod helpers;
