mod openai_embedder_test;
