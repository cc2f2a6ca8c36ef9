mod in_memory_vector_store_test;
