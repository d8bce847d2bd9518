mod bookkeeping;
mod interpreter;
mod reproduction;
