mod source;
mod write;
